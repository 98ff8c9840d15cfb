use crate::error::Error;

/// Parse a model reply such as `"12, 14, 15"` into indices.
///
/// Tolerates surrounding prose, brackets, newlines and trailing periods.
/// Fails when the reply holds no number at all, or when the numeric part
/// contains anything that is not a non-negative integer.
pub fn parse_index_list(reply: &str) -> Result<Vec<usize>, Error> {
    let unparsable = || Error::Unparsable(reply.to_string());

    let first_digit = reply.find(|c: char| c.is_ascii_digit()).ok_or_else(unparsable)?;
    // A sign in front of the first number belongs to it.
    let start = match reply[..first_digit].strip_suffix('-') {
        Some(signed) => signed.len(),
        None => first_digit,
    };
    let end = reply
        .rfind(|c: char| c.is_ascii_digit())
        .map(|i| i + 1)
        .ok_or_else(unparsable)?;

    reply[start..end]
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim_matches(|c: char| matches!(c, '.' | '[' | ']' | '(' | ')')))
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<usize>().map_err(|_| unparsable()))
        .collect()
}
