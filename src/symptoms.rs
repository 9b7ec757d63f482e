//! Symptom text normalization
//!
//! Turns whatever the user typed into the token list the prediction
//! service expects.

#[cfg(test)]
mod proptests;

/// Split free-text symptom input into lower-cased, trimmed tokens.
///
/// Pieces are separated by `,` or `;`. Empty pieces are dropped, so input
/// made only of separators and whitespace yields an empty list.
#[must_use]
pub fn normalize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split([',', ';'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
