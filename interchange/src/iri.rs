//! IRI resolution and local-name extraction.
//!
//! Resolution is deliberately naive: absolute `http(s)` IRIs pass through,
//! fragments are glued onto the base without doubling the `#`, and anything
//! else is concatenated. No `..` or path normalization is performed.

/// Resolves `iri` against `base`.
///
/// - `http://` / `https://` IRIs are returned unchanged.
/// - `#Frag` drops one trailing `#` from `base` before concatenating.
/// - Anything else is appended to `base` as-is.
/// - An empty `iri` is returned unchanged.
///
/// ```
/// use onto_interchange::iri::resolve;
///
/// assert_eq!(resolve("#Person", "http://ex.org/onto#"), "http://ex.org/onto#Person");
/// assert_eq!(resolve("http://ex.org/X", "http://ex.org/onto#"), "http://ex.org/X");
/// ```
#[must_use]
pub fn resolve(iri: &str, base: &str) -> String {
    if iri.is_empty() || is_absolute(iri) {
        return iri.to_owned();
    }
    if iri.starts_with('#') {
        let base = base.strip_suffix('#').unwrap_or(base);
        return format!("{base}{iri}");
    }
    format!("{base}{iri}")
}

/// Returns true for `http://` and `https://` IRIs.
#[must_use]
pub fn is_absolute(iri: &str) -> bool {
    iri.starts_with("http://") || iri.starts_with("https://")
}

/// Returns the human-readable tail of an IRI: the fragment after the last
/// `#`, else the segment after the last `/`, else the IRI itself.
///
/// Empty tails are skipped, so `http://ex.org/onto/` yields the raw IRI
/// rather than an empty string.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    if let Some((_, fragment)) = iri.rsplit_once('#') {
        if !fragment.is_empty() {
            return fragment;
        }
    }
    if let Some((_, segment)) = iri.rsplit_once('/') {
        if !segment.is_empty() {
            return segment;
        }
    }
    iri
}

/// Splits an IRI into `(namespace, local)` at the last `#` or `/`.
///
/// Returns `None` when there is no separator or the local part would be empty.
#[must_use]
pub fn split_namespace(iri: &str) -> Option<(&str, &str)> {
    let cut = iri.rfind(['#', '/'])? + 1;
    let (namespace, local) = iri.split_at(cut);
    (!local.is_empty()).then_some((namespace, local))
}

/// The label a parsed entity carries: its explicit `rdfs:label`, or the
/// IRI's local name when there is none. Parsers use the result as both
/// `label` and `name`.
#[must_use]
pub fn label_or_local_name(explicit: Option<&str>, id: &str) -> String {
    explicit.unwrap_or_else(|| local_name(id)).to_owned()
}
