//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from
//! filesystem lookups.

pub mod cache;
pub mod isolation;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_403_response, build_404_response, build_500_response,
    build_501_response, build_error_response, build_file_response, build_html_response,
    build_redirect_response, escape_html,
};
