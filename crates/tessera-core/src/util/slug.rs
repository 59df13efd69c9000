//! Slug normalization for authored labels.
//!
//! Authors type configuration keys and column headers freely ("Path Filter",
//! "path filter", "Path-Filter"). Every consumer compares them in slugged
//! form so that all spellings land on the same key.

/// Normalize free text into a lowercase, hyphenated key.
///
/// Steps, in order: trim, lowercase, replace each run of whitespace with a
/// single `-`, then drop every character that is not an ASCII letter, digit,
/// `_` or `-`.
///
/// The output alphabet is closed under the same steps, so slugging twice
/// equals slugging once.
///
/// # Example
///
/// ```
/// use tessera_core::slugify;
///
/// assert_eq!(slugify("  Path Filter "), "path-filter");
/// assert_eq!(slugify("Path-Filter"), "path-filter");
/// assert_eq!(slugify("Sort (by)"), "sort-by");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }

    out
}
