//! `mailto:` grammar

use super::{Components, Mode};
use crate::charset::{is_domain, is_mailsafe};
use crate::error::ParseError;
use crate::types::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Mailto,
    Semicolon,
    Slash,
    SlashSlash,
    PrefixQuestion,
    Destination,
    Equal,
    User,
    At,
    Domain,
    SuffixQuestion,
    Query,
}

/// Unexpected byte: lenient mode keeps what was read so far.
fn stop(mode: Mode, mut out: Components, p: usize) -> Result<Components, ParseError> {
    match mode {
        Mode::Strict => Err(ParseError::BadFormat),
        Mode::Lenient => {
            out.end = p;
            Ok(out)
        }
    }
}

#[inline]
fn is_query_byte(b: u8) -> bool {
    is_mailsafe(b) || b == b'=' || b == b'&'
}

/// Run the mailto grammar over `input`, which starts with the scheme.
///
/// Accepted forms are `mailto:user@host`, `mailto://user@host`,
/// `mailto:?to=user@host` and any of them followed by `?query`.
pub fn parse_mailto(input: &[u8], mode: Mode) -> Result<Components, ParseError> {
    let end = input.len();
    let mut out = Components::default();
    let mut state = State::Mailto;
    let mut p = 0;
    let mut c = 0;

    while p < end {
        let t = input[p];

        match state {
            State::Mailto => {
                if t == b':' {
                    out.scheme = Some(Span::between(c, p));
                    state = State::Semicolon;
                }
                p += 1;
            }
            State::Semicolon => {
                if t == b'/' {
                    state = State::Slash;
                    p += 1;
                } else {
                    state = State::SlashSlash;
                }
            }
            State::Slash => {
                if t != b'/' {
                    return stop(mode, out, p);
                }
                state = State::SlashSlash;
                p += 1;
            }
            State::SlashSlash => match t {
                b'?' => {
                    state = State::PrefixQuestion;
                    p += 1;
                }
                b'/' => p += 1,
                _ => {
                    c = p;
                    state = State::User;
                }
            },
            State::PrefixQuestion => {
                // Only `to=` is understood
                if t != b't' {
                    return stop(mode, out, p);
                }
                state = State::Destination;
            }
            State::Destination => {
                if t == b'=' {
                    state = State::Equal;
                }
                p += 1;
            }
            State::Equal => {
                c = p;
                state = State::User;
            }
            State::User => {
                if t == b'@' {
                    if p == c {
                        return stop(mode, out, p);
                    }
                    out.user = Some(Span::between(c, p));
                    state = State::At;
                } else if !is_mailsafe(t) {
                    return stop(mode, out, p);
                }
                p += 1;
            }
            State::At => {
                c = p;
                state = State::Domain;
            }
            State::Domain => {
                if t == b'?' {
                    out.host = Some(Span::between(c, p));
                    state = State::SuffixQuestion;
                } else if !is_domain(t) && t != b'.' && t != b'_' {
                    return stop(mode, out, p);
                }
                p += 1;
            }
            State::SuffixQuestion => {
                c = p;
                state = State::Query;
            }
            State::Query => {
                if !is_query_byte(t) {
                    return stop(mode, out, p);
                }
                p += 1;
            }
        }
    }

    match state {
        State::Domain if p > c => out.host = Some(Span::between(c, p)),
        State::Query => {
            if p > c {
                out.query = Some(Span::between(c, p));
            }
        }
        _ => return stop(mode, out, p),
    }

    out.end = p;
    Ok(out)
}
