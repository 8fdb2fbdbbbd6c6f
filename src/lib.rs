//! Local static file server for previewing cross-origin isolated web apps.
//!
//! Files under a root directory are served over plain HTTP, and every
//! response carries `Cross-Origin-Embedder-Policy: require-corp` and
//! `Cross-Origin-Opener-Policy: same-origin`, so pages can use
//! `SharedArrayBuffer` the same way they would in production.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
