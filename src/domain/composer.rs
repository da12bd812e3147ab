//! Query-string passthrough onto the chosen destination.
//!
//! Composition is plain string concatenation. The incoming query is already
//! percent-encoded as received and is forwarded byte-for-byte, so tracking
//! macros such as `{clickid}` or duplicated keys survive untouched. Do not
//! replace this with `url::Url` query merging.

/// Appends `incoming_query` to `target`.
///
/// - empty query: `target` unchanged
/// - `target` already has a `?`: joined with `&`
/// - otherwise: joined with `?`
pub fn compose(target: &str, incoming_query: &str) -> String {
    if incoming_query.is_empty() {
        return target.to_string();
    }

    let separator = if target.contains('?') { '&' } else { '?' };

    let mut composed = String::with_capacity(target.len() + 1 + incoming_query.len());
    composed.push_str(target);
    composed.push(separator);
    composed.push_str(incoming_query);
    composed
}
