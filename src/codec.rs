//! Percent-decoding of `.trashinfo` paths.

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("buffer too small (got {available}, needed a minimum of {needed})")]
    Overflow { needed: usize, available: usize },

    #[error("'%' at byte {0} is not followed by two hex digits")]
    InvalidEscape(usize),
}

/// Decodes `%XX` sequences in `input`, copying every other byte verbatim.
///
/// `capacity` counts a trailing terminator, so the decoded bytes must number
/// at most `capacity - 1`. Overflow fails the whole decode; nothing partial
/// is returned.
pub fn decode(input: &[u8], capacity: usize) -> Result<Vec<u8>, CodecError> {
    check_escapes(input)?;

    let decoded = urlencoding::decode_binary(input);
    let needed = decoded.len() + 1;
    if needed > capacity {
        return Err(CodecError::Overflow {
            needed,
            available: capacity,
        });
    }

    Ok(decoded.into_owned())
}

/// `urlencoding` passes malformed escapes through untouched; refuse them.
fn check_escapes(input: &[u8]) -> Result<(), CodecError> {
    for (pos, _) in input.iter().enumerate().filter(|(_, c)| **c == b'%') {
        let valid = input
            .get(pos + 1..pos + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(CodecError::InvalidEscape(pos));
        }
    }
    Ok(())
}
