//! Token estimation for usage reporting.
//!
//! There is no real tokenizer: one token is counted per four characters,
//! rounded down. The number only has to be stable and reproducible.

/// Characters per estimated token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `text` as `floor(chars / 4)`.
///
/// Characters are Unicode scalar values, not bytes.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / CHARS_PER_TOKEN
}

/// Estimate prompt tokens for message contents joined by single spaces.
pub fn estimate_prompt_tokens<'a, I>(contents: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = contents.into_iter().collect::<Vec<_>>().join(" ");
    estimate_tokens(&joined)
}
