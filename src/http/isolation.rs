//! Cross-origin isolation headers
//!
//! Browsers only expose `SharedArrayBuffer` and high-resolution timers to
//! documents served with both of these headers.

use hyper::header::{HeaderName, HeaderValue};
use hyper::Response;

pub const CROSS_ORIGIN_EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";
pub const CROSS_ORIGIN_OPENER_POLICY: &str = "cross-origin-opener-policy";

/// Header pairs added to every response
pub const ISOLATION_HEADERS: [(&str, &str); 2] = [
    (CROSS_ORIGIN_EMBEDDER_POLICY, "require-corp"),
    (CROSS_ORIGIN_OPENER_POLICY, "same-origin"),
];

/// Add the isolation headers to a finished response
///
/// Existing values are replaced so each header is sent exactly once.
pub fn apply<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    for (name, value) in ISOLATION_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_adds_both_headers() {
        let mut resp = Response::builder().status(404).body(()).unwrap();
        apply(&mut resp);
        assert_eq!(
            resp.headers()["Cross-Origin-Embedder-Policy"],
            "require-corp"
        );
        assert_eq!(resp.headers()["Cross-Origin-Opener-Policy"], "same-origin");
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_apply_replaces_existing_values() {
        let mut resp = Response::builder()
            .header("Cross-Origin-Opener-Policy", "unsafe-none")
            .header("Cross-Origin-Opener-Policy", "same-origin-allow-popups")
            .body(())
            .unwrap();
        apply(&mut resp);
        let values: Vec<_> = resp
            .headers()
            .get_all("cross-origin-opener-policy")
            .iter()
            .collect();
        assert_eq!(values, vec!["same-origin"]);
    }
}
