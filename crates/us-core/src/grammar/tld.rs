//! Host names anchored on a public suffix found in free text

use super::web::web_end;
use crate::charset::{is_domain, is_lwsp, is_url_end, is_url_start};

#[inline]
fn ends_host(b: u8) -> bool {
    is_lwsp(b) || b == b'/' || b == b'?' || b == b':'
}

/// Quick filter for a suffix hit ending at `end`: the host must stop right
/// there, optionally after a single trailing dot.
pub fn tld_followed_by_host_end(text: &[u8], end: usize) -> bool {
    match text.get(end) {
        None => true,
        Some(&b) if ends_host(b) || b == b',' || is_url_end(b) => true,
        Some(b'.') => text.get(end + 1).map_or(true, |&b| ends_host(b)),
        Some(_) => false,
    }
}

/// Walk back from the `.` of a suffix hit at `text[pos]` to where the host
/// name begins.
///
/// The host must be preceded by whitespace or an opening bracket, or start
/// the text. Labels must begin with an alphanumeric and a `/` anywhere in
/// the way rejects the match.
pub fn find_tld_host_start(text: &[u8], pos: usize) -> Option<usize> {
    let mut p = pos;

    loop {
        let b = text[p];

        if (!is_domain(b) && b != b'.' && b != b'/') || is_lwsp(b) {
            if !is_url_start(b) && !is_lwsp(b) {
                return None;
            }
            // Hosts cannot start with a symbol
            return match text.get(p + 1) {
                Some(n) if n.is_ascii_alphanumeric() => Some(p + 1),
                _ => None,
            };
        } else if p == 0 && p != pos {
            return Some(0);
        } else if b == b'.' {
            if p == 0 {
                return None;
            }
            if !text.get(p + 1).is_some_and(|n| n.is_ascii_alphanumeric()) {
                return None;
            }
        } else if b == b'/' {
            return None;
        }

        if p == 0 {
            return None;
        }
        p -= 1;
    }
}

/// Where a host found by [`find_tld_host_start`] ends. `begin` is the host
/// start and `suffix_end` the end of the suffix hit.
///
/// A port or path after the suffix is read with the lenient web grammar.
pub fn find_tld_host_end(text: &[u8], begin: usize, suffix_end: usize) -> Option<usize> {
    let web = || web_end(&text[begin..]).map(|len| begin + len);

    match text.get(suffix_end) {
        None => Some(suffix_end),
        Some(&b) if is_lwsp(b) || b == b',' || is_url_end(b) => Some(suffix_end),
        Some(b'/' | b':' | b'?') => web(),
        Some(b'.') => match text.get(suffix_end + 1) {
            Some(&b) if is_lwsp(b) || b == b'/' || b == b'?' || b == b':' => web(),
            _ => None,
        },
        Some(_) => None,
    }
}
