//! Request handler module
//!
//! Maps request paths onto the root directory and builds the responses:
//! files, index files, directory listings, redirects and error pages.

pub mod listing;
pub mod path;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
