//! Media-reference resolution.
//!
//! The content source represents an attached image in a handful of mutually
//! inconsistent shapes: a bare URL string, a record with a direct `url`, the
//! collection wrapper `data.attributes.url`, a `formats` map keyed by size
//! name, a bare upload `name`, or arrays and self-referential wrappers around
//! any of those. [`resolve_media_url`] is the one place all of them are
//! handled; callers never inspect media JSON themselves.

use serde_json::Value;

/// Size names tried when a reference only carries a `formats` map, in
/// preference order.
const FORMAT_PREFERENCE: [&str; 3] = ["medium", "small", "thumbnail"];

/// Resolves a media reference to a displayable URL.
///
/// Total over every observed upstream shape: returns `Some` well-formed URL
/// or `None`, never panics and never returns an empty string. Callers are
/// responsible for substituting a placeholder asset on `None`.
///
/// Checks run in priority order, first match wins:
///
/// 1. `null`/absent — `None`.
/// 2. A string — returned as-is when it carries a scheme, otherwise joined
///    onto `base_url`.
/// 3. An array — the first element is authoritative.
/// 4. `data` — collection wrapper, recurse.
/// 5. `attributes.url`, then `url` — scheme rule as for strings.
/// 6. `formats` — first present of `medium`/`small`/`thumbnail`, recurse.
/// 7. `name` — upload with no URL field, constructs `{base}/uploads/{name}`.
/// 8. `image` — self-referential wrapper, recurse.
/// 9. Anything else — `None`.
#[must_use]
pub fn resolve_media_url(reference: &Value, base_url: &str) -> Option<String> {
    match reference {
        Value::String(url) => resolve_url_string(url, base_url),
        Value::Array(items) => items
            .first()
            .and_then(|first| resolve_media_url(first, base_url)),
        Value::Object(fields) => {
            if let Some(data) = fields.get("data") {
                return resolve_media_url(data, base_url);
            }
            if let Some(url) = fields
                .get("attributes")
                .and_then(|attributes| attributes.get("url"))
                .and_then(Value::as_str)
            {
                return resolve_url_string(url, base_url);
            }
            if let Some(url) = fields.get("url").and_then(Value::as_str) {
                return resolve_url_string(url, base_url);
            }
            if let Some(formats) = fields.get("formats").filter(|f| f.is_object()) {
                if let Some(format) = FORMAT_PREFERENCE.iter().find_map(|key| formats.get(*key)) {
                    return resolve_media_url(format, base_url);
                }
            }
            if let Some(name) = fields
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
            {
                return Some(join_base(base_url, &format!("uploads/{name}")));
            }
            if let Some(image) = fields.get("image") {
                return resolve_media_url(image, base_url);
            }
            tracing::debug!("unrecognized media reference shape");
            None
        }
        _ => None,
    }
}

/// Applies the scheme rule to a URL string: absolute passthrough when it
/// contains a scheme, base-prefixed otherwise. Empty strings degrade to
/// `None` so resolution never yields `""`.
fn resolve_url_string(url: &str, base_url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    // Case-sensitive substring check, matching observed upstream data.
    if url.contains("http") {
        return Some(url.to_string());
    }
    Some(join_base(base_url, url))
}

/// Joins a root-relative path onto the base URL with exactly one separating
/// slash, whatever combination of trailing/leading slashes the inputs carry.
fn join_base(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
