//! Deterministic review-text normalization.
//!
//! Normalization lowercases the input, drops characters outside the
//! ASCII alphanumeric + whitespace set, removes URL-shaped substrings,
//! and collapses runs of whitespace. The function is total (any input
//! maps to a string, possibly empty) and idempotent.
//!
//! # Examples
//!
//! ```
//! use resena::text::normalize::normalize;
//!
//! let clean = normalize("Great App!! see https://example.com NOW");
//! assert_eq!(clean, "great app see now");
//!
//! // Idempotent: a second pass changes nothing
//! assert_eq!(normalize(&clean), clean);
//! ```

/// Normalize raw review text into the pipeline's clean form.
///
/// Steps, in order: lowercase, drop non-alphanumeric/non-whitespace
/// characters, remove `http…` runs up to the next whitespace, collapse
/// whitespace, trim.
///
/// # Examples
///
/// ```
/// use resena::text::normalize::normalize;
///
/// assert_eq!(normalize("  Fast   & easy!  "), "fast easy");
/// assert_eq!(normalize("visit http://bank.example now"), "visit now");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    let mut kept = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() || ch.is_whitespace() {
            kept.push(ch);
        }
    }

    let stripped = strip_urls(&kept);

    let words: Vec<&str> = stripped.split_whitespace().collect();
    words.join(" ")
}

/// Remove every `http`-led run of non-whitespace characters.
///
/// A bare `http` followed by whitespace or end of input is ordinary text
/// and is kept. Runs after the character filter, so obfuscated URLs whose
/// punctuation was removed are still caught.
fn strip_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("http") {
        let after = &rest[pos + 4..];
        let is_url = after
            .chars()
            .next()
            .map_or(false, |c| !c.is_whitespace());

        if is_url {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
            rest = &tail[end..];
        } else {
            out.push_str(&rest[..pos + 4]);
            rest = &rest[pos + 4..];
        }
    }

    out.push_str(rest);
    out
}
