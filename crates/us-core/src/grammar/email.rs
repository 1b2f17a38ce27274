//! Bare `local@domain` detection around an `@`

use crate::charset::{is_domain, is_mailsafe};
use crate::types::Span;

/// Bound the email address around the `@` at `text[pos]`.
///
/// The local part extends left over mail-safe bytes, the domain right over
/// domain bytes. Both ends are then pulled in to the nearest alphanumeric.
pub fn find_bare_email(text: &[u8], pos: usize) -> Option<Span> {
    let end = text.len();

    if pos < 2 || pos + 2 >= end {
        return None;
    }
    if !text[pos - 1].is_ascii_alphanumeric() || !text[pos + 1].is_ascii_alphanumeric() {
        return None;
    }

    let mut c = pos - 1;
    while c > 0 && is_mailsafe(text[c]) {
        c -= 1;
    }
    while c < pos && !text[c].is_ascii_alphanumeric() {
        c += 1;
    }

    let mut p = pos + 1;
    while p < end && is_domain(text[p]) {
        p += 1;
    }
    while p > pos && p < end && !text[p].is_ascii_alphanumeric() {
        p -= 1;
    }
    if p < end && text[p].is_ascii_alphanumeric() {
        p += 1;
    }

    (p > c).then(|| Span::between(c, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(text: &str) -> Option<&str> {
        let pos = text.find('@')?;
        find_bare_email(text.as_bytes(), pos).map(|s| &text[s.off..s.end()])
    }

    #[test]
    fn test_in_sentence() {
        assert_eq!(email("contact bob@example.com now"), Some("bob@example.com"));
        assert_eq!(email("bob@example.com"), Some("bob@example.com"));
        assert_eq!(email("<j.doe+tag@mail.example.org>"), Some("j.doe+tag@mail.example.org"));
    }

    #[test]
    fn test_trims_punctuation() {
        assert_eq!(email("(ann@site.net)"), Some("ann@site.net"));
        assert_eq!(email("mail ann@site.net, please"), Some("ann@site.net"));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(email("a@b"), None);
        assert_eq!(email("@@example.com"), None);
        assert_eq!(email("bob @example.com"), None);
        assert_eq!(email("bob@ example.com"), None);
        assert_eq!(email("x bob@"), None);
    }
}
