//! Strict UTF-8 validation for paths handed across the library boundary.
//!
//! Paths arrive as raw byte strings (from C callers or from the CLI after
//! platform argument marshaling). They are checked here before they are
//! ever turned into filesystem paths.

use crate::error::ConvertError;

/// Returns `true` if `bytes` is a well-formed UTF-8 encoding.
///
/// Overlong forms, encoded surrogates (U+D800..U+DFFF), code points above
/// U+10FFFF, stray continuation bytes and sequences truncated at the end of
/// the input are all rejected. Interior NUL bytes are accepted.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    let mut rest = bytes;
    while !rest.is_empty() {
        match sequence_width(rest) {
            Some(width) => rest = &rest[width..],
            None => return false,
        }
    }
    true
}

#[inline]
fn is_cont(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Width of the well-formed sequence at the start of `rest`, if there is one.
fn sequence_width(rest: &[u8]) -> Option<usize> {
    match *rest {
        [0x00..=0x7F, ..] => Some(1),

        [0xC2..=0xDF, b1, ..] if is_cont(b1) => Some(2),

        [0xE0, 0xA0..=0xBF, b2, ..] if is_cont(b2) => Some(3),
        [0xE1..=0xEC | 0xEE..=0xEF, b1, b2, ..] if is_cont(b1) && is_cont(b2) => Some(3),
        [0xED, 0x80..=0x9F, b2, ..] if is_cont(b2) => Some(3),

        [0xF0, 0x90..=0xBF, b2, b3, ..] if is_cont(b2) && is_cont(b3) => Some(4),
        [0xF1..=0xF3, b1, b2, b3, ..] if is_cont(b1) && is_cont(b2) && is_cont(b3) => Some(4),
        [0xF4, 0x80..=0x8F, b2, b3, ..] if is_cont(b2) && is_cont(b3) => Some(4),

        _ => None,
    }
}

/// Check the input/output path pair and borrow both as `&str`.
///
/// Checks run in a fixed order over both paths: presence, then emptiness,
/// then encoding. The first failing check decides the error, so a null
/// output path wins over a malformed input path.
pub fn validate_paths<'a>(
    input: Option<&'a [u8]>,
    output: Option<&'a [u8]>,
) -> Result<(&'a str, &'a str), ConvertError> {
    let (Some(input), Some(output)) = (input, output) else {
        return Err(ConvertError::NullPath);
    };
    if input.is_empty() || output.is_empty() {
        return Err(ConvertError::EmptyPath);
    }
    if !is_valid_utf8(input) || !is_valid_utf8(output) {
        return Err(ConvertError::InvalidUtf8);
    }
    // Both passed the strict check above, so the std conversions cannot fail.
    match (std::str::from_utf8(input), std::str::from_utf8(output)) {
        (Ok(input), Ok(output)) => Ok((input, output)),
        _ => Err(ConvertError::InvalidUtf8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;

    #[test]
    fn test_ascii() {
        assert!(is_valid_utf8(b""));
        assert!(is_valid_utf8(b"model.step"));
        assert!(is_valid_utf8(&[0x00, 0x7F, 0x41, 0x00]));
    }

    #[test]
    fn test_multibyte() {
        assert!(is_valid_utf8("überteil.stp".as_bytes()));
        assert!(is_valid_utf8("部品/ブラケット.step".as_bytes()));
        assert!(is_valid_utf8("\u{10FFFF}".as_bytes()));
        assert!(is_valid_utf8("\u{1F529} bolt".as_bytes()));
        assert!(is_valid_utf8(&[0xED, 0x9F, 0xBF])); // U+D7FF, just below surrogates
        assert!(is_valid_utf8(&[0xEE, 0x80, 0x80])); // U+E000, just above surrogates
    }

    #[test]
    fn test_stray_continuation() {
        for b in 0x80..=0xBFu8 {
            assert!(!is_valid_utf8(&[b]), "lone {b:#04x}");
            assert!(!is_valid_utf8(&[b'a', b, b'b']), "embedded {b:#04x}");
        }
    }

    #[test]
    fn test_overlong() {
        assert!(!is_valid_utf8(&[0xC0, 0x80]));
        assert!(!is_valid_utf8(&[0xC1, 0xBF]));
        assert!(!is_valid_utf8(&[0xE0, 0x9F, 0xBF]));
        assert!(!is_valid_utf8(&[0xF0, 0x8F, 0xBF, 0xBF]));
    }

    #[test]
    fn test_surrogates() {
        for b1 in 0xA0..=0xBFu8 {
            assert!(!is_valid_utf8(&[0xED, b1, 0x80]), "surrogate ED {b1:#04x}");
        }
    }

    #[test]
    fn test_above_max_code_point() {
        assert!(!is_valid_utf8(&[0xF4, 0x90, 0x80, 0x80]));
        for lead in 0xF5..=0xFFu8 {
            assert!(!is_valid_utf8(&[lead, 0x80, 0x80, 0x80]));
        }
    }

    #[test]
    fn test_truncated() {
        assert!(!is_valid_utf8(&[0xE1]));
        assert!(!is_valid_utf8(&[0xC3]));
        assert!(!is_valid_utf8(&[0xE1, 0x80]));
        assert!(!is_valid_utf8(&[0xF0, 0x9F, 0x94]));
        assert!(!is_valid_utf8(b"part\xE2\x82"));
    }

    #[test]
    fn test_bad_continuation() {
        assert!(!is_valid_utf8(&[0xC3, 0x41]));
        assert!(!is_valid_utf8(&[0xE1, 0x80, 0xC0]));
        assert!(!is_valid_utf8(&[0xF1, 0x80, 0x80, 0x7F]));
    }

    #[test]
    fn test_validate_paths_order() {
        let good: &[u8] = b"in.step";
        let bad: &[u8] = &[0xFF];
        let err = validate_paths(Some(bad), None).unwrap_err();
        assert_eq!(err.status(), Status::NullPath);
        let err = validate_paths(Some(bad), Some(b"".as_slice())).unwrap_err();
        assert_eq!(err.status(), Status::EmptyPath);
        let err = validate_paths(Some(good), Some(bad)).unwrap_err();
        assert_eq!(err.status(), Status::InvalidUtf8);

        let (input, output) = validate_paths(Some(good), Some(b"out.stl".as_slice())).unwrap();
        assert_eq!(input, "in.step");
        assert_eq!(output, "out.stl");
    }
}
