//! Path pattern matching for transition rules
//!
//! Three pattern forms, matched case-sensitively on `/`-delimited segments:
//!
//! - exact: `/products` matches only `/products`
//! - trailing wildcard: `/products/*` matches `/products` itself and any
//!   deeper path under it (`/products/42`, `/products/42/reviews`), always
//!   on a segment boundary; `/postscript` is not under `/posts/*`
//! - universal: `*` matches any path

/// Match a concrete path against a pattern.
pub fn match_path(path: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'));
    }

    path == pattern
}
