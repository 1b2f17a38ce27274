//! Percent-decoding of URL components

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes.
///
/// A `%` that is not followed by two hex digits is kept as is, so the output
/// is never longer than the input and a component without escapes comes back
/// unchanged.
pub fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let b = input[i];
        if b == b'%' && i + 2 < input.len() {
            if let (Some(hi), Some(lo)) = (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }

    out
}

/// Returns true if the input contains at least one decodable escape.
pub fn needs_decoding(input: &[u8]) -> bool {
    input
        .windows(3)
        .any(|w| w[0] == b'%' && hex_value(w[1]).is_some() && hex_value(w[2]).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_escapes() {
        assert_eq!(percent_decode(b"a%20b"), b"a b");
        assert_eq!(percent_decode(b"%41%42c"), b"ABc");
        assert_eq!(percent_decode(b"%2f%2F"), b"//");
    }

    #[test]
    fn test_decode_keeps_malformed() {
        assert_eq!(percent_decode(b"100%"), b"100%");
        assert_eq!(percent_decode(b"%4"), b"%4");
        assert_eq!(percent_decode(b"%zz"), b"%zz");
        assert_eq!(percent_decode(b"%%41"), b"%A");
    }

    #[test]
    fn test_plain_input_unchanged() {
        let input = b"/path/to/file.html";
        assert_eq!(percent_decode(input), input);
        assert!(!needs_decoding(input));
        assert!(needs_decoding(b"x%3d1"));
    }

    #[test]
    fn test_high_bytes() {
        assert_eq!(percent_decode(b"%FF%fe"), [0xff, 0xfe]);
    }
}
