//! Profanity masking for chirp bodies.

pub const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

/// Replace each banned word with `****`.
///
/// Words are split on single spaces and compared case-insensitively. A word
/// with punctuation attached (`Sharbert!`) is not a match.
pub fn clean_body(body: &str, banned: &[&str]) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if banned.iter().any(|b| *b == lowered) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
