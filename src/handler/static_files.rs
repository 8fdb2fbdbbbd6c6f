//! Static file serving module
//!
//! Resolves request paths under the root, then serves files, index files,
//! directory listings, redirects and errors.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::path::{self, RequestPath};
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use tokio::fs;

/// Serve whatever the request path names under the root directory
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let request_path = RequestPath::parse(ctx.path);
    let target = request_path.resolve(state.root());

    let metadata = match fs::metadata(&target).await {
        Ok(m) => m,
        Err(e) => return io_error_response(&e, "Permission denied", ctx.is_head),
    };

    if !state.config.http.follow_symlinks && !is_within_root(&target, state.root()).await {
        logger::log_warning(&format!(
            "Symlink outside root refused: {} -> {}",
            ctx.path,
            target.display()
        ));
        return http::build_404_response(ctx.is_head);
    }

    if metadata.is_dir() {
        if !request_path.trailing_slash() {
            return http::build_redirect_response(&redirect_location(ctx.path, ctx.query));
        }
        return serve_directory(ctx, state, &target).await;
    }

    // A trailing slash names a directory; files don't match it
    if request_path.trailing_slash() {
        return http::build_404_response(ctx.is_head);
    }

    serve_file(ctx, &target, &metadata).await
}

/// Serve the first index file found in `dir`, or a generated listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        if let Ok(metadata) = fs::metadata(&index_path).await {
            if metadata.is_file() {
                return serve_file(ctx, &index_path, &metadata).await;
            }
        }
    }

    match listing::read_entries(dir).await {
        Ok(entries) => {
            let html = listing::render(&path::decode(ctx.path), &entries);
            http::build_html_response(html, ctx.is_head)
        }
        Err(e) => io_error_response(&e, "No permission to list directory", ctx.is_head),
    }
}

/// Serve a regular file, honoring `If-Modified-Since`
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    metadata: &Metadata,
) -> Response<Full<Bytes>> {
    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    if cache::is_not_modified(ctx.if_modified_since, ctx.if_none_match, modified) {
        return http::build_304_response(last_modified.as_deref());
    }

    let content_type = mime::content_type_for(file_path);

    // HEAD only needs the size, but the file must still be openable
    if ctx.is_head {
        return match fs::File::open(file_path).await {
            Ok(_) => http::build_file_response(
                Bytes::new(),
                metadata.len(),
                content_type,
                last_modified.as_deref(),
            ),
            Err(e) => io_error_response(&e, "Permission denied", true),
        };
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => return io_error_response(&e, "Permission denied", false),
    };

    let content_length = content.len() as u64;
    http::build_file_response(
        Bytes::from(content),
        content_length,
        content_type,
        last_modified.as_deref(),
    )
}

/// Map a filesystem error to an error page
///
/// Permission problems become 403, lookups that found nothing become 404,
/// and anything else is a 500.
fn io_error_response(
    err: &io::Error,
    forbidden_message: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Permission denied: {err}"));
            http::build_403_response(forbidden_message, is_head)
        }
        io::ErrorKind::NotFound
        | io::ErrorKind::NotADirectory
        | io::ErrorKind::InvalidInput => http::build_404_response(is_head),
        _ => {
            logger::log_error(&format!("Failed to read from disk: {err}"));
            http::build_500_response("Failed to read file", is_head)
        }
    }
}

/// Redirect target for a directory requested without its trailing slash
///
/// Leading slashes are collapsed so the result can never be read as a
/// protocol-relative `//host/...` URL.
fn redirect_location(raw_path: &str, query: Option<&str>) -> String {
    let mut location = format!("/{}/", raw_path.trim_start_matches('/'));
    if let Some(q) = query {
        location.push('?');
        location.push_str(q);
    }
    location
}

async fn is_within_root(target: &Path, root: &Path) -> bool {
    fs::canonicalize(target)
        .await
        .is_ok_and(|canonical| canonical.starts_with(root))
}
