//! Byte classification for the URL grammars
//!
//! Every state machine in this crate decides what to do with a byte by looking
//! it up in a single 256-entry table. The table is built at compile time and
//! never changes.

bitflags::bitflags! {
    /// Classes a byte may belong to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// Linear whitespace (`\t`, `\n`, `\v`, `\f`, `\r`, space)
        const LWSP = 1 << 0;
        /// May appear inside a host name (high bytes included)
        const DOMAIN = 1 << 1;
        /// May appear in a scheme-less URL body
        const URLSAFE = 1 << 2;
        /// May appear in the local part of an email address
        const MAILSAFE = 1 << 3;
        /// Terminates a host name token
        const DOMAIN_END = 1 << 4;
    }
}

const LWSP: u8 = CharClass::LWSP.bits();
const DOMAIN: u8 = CharClass::DOMAIN.bits();
const URLSAFE: u8 = CharClass::URLSAFE.bits();
const MAILSAFE: u8 = CharClass::MAILSAFE.bits();
const DOMAIN_END: u8 = CharClass::DOMAIN_END.bits();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];

    let mut b = 9;
    while b <= 13 {
        table[b] = LWSP;
        b += 1;
    }
    table[b' ' as usize] = LWSP;

    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] = URLSAFE | DOMAIN | MAILSAFE;
        b += 1;
    }
    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = URLSAFE | DOMAIN | MAILSAFE;
        table[(b - 32) as usize] = URLSAFE | DOMAIN | MAILSAFE;
        b += 1;
    }

    let punct: [(u8, u8); 31] = [
        (b'!', MAILSAFE),
        (b'"', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'#', DOMAIN_END | MAILSAFE),
        (b'$', MAILSAFE),
        (b'%', URLSAFE | DOMAIN | MAILSAFE),
        (b'\'', MAILSAFE),
        (b'(', MAILSAFE),
        (b')', MAILSAFE),
        (b'*', MAILSAFE),
        (b'+', MAILSAFE),
        (b',', MAILSAFE),
        (b'-', URLSAFE | DOMAIN | MAILSAFE),
        (b'.', URLSAFE | DOMAIN | MAILSAFE),
        (b'/', DOMAIN_END | MAILSAFE),
        (b':', DOMAIN_END),
        (b';', MAILSAFE),
        (b'<', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'>', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'?', DOMAIN_END),
        (b'[', MAILSAFE),
        (b'\\', URLSAFE | DOMAIN | MAILSAFE),
        (b']', MAILSAFE),
        (b'^', URLSAFE | DOMAIN | MAILSAFE),
        (b'_', URLSAFE | DOMAIN | MAILSAFE),
        (b'`', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'{', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'|', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'}', URLSAFE | DOMAIN_END | MAILSAFE),
        (b'~', URLSAFE | DOMAIN_END | MAILSAFE),
        // `&`, `=` and `@` belong to no class
        (b'&', 0),
        (b'=', 0),
    ];
    let mut i = 0;
    while i < punct.len() {
        table[punct[i].0 as usize] = punct[i].1;
        i += 1;
    }

    let mut b = 0x80;
    while b <= 0xff {
        table[b] = URLSAFE | DOMAIN;
        b += 1;
    }

    table
}

static CLASS_TABLE: [u8; 256] = build_table();

/// Classify a byte.
#[inline]
pub fn classify(b: u8) -> CharClass {
    CharClass::from_bits_retain(CLASS_TABLE[b as usize])
}

#[inline]
pub fn is_lwsp(b: u8) -> bool {
    CLASS_TABLE[b as usize] & LWSP != 0
}

#[inline]
pub fn is_domain(b: u8) -> bool {
    CLASS_TABLE[b as usize] & DOMAIN != 0
}

#[inline]
pub fn is_urlsafe(b: u8) -> bool {
    CLASS_TABLE[b as usize] & URLSAFE != 0
}

#[inline]
pub fn is_mailsafe(b: u8) -> bool {
    CLASS_TABLE[b as usize] & MAILSAFE != 0
}

#[inline]
pub fn is_domain_end(b: u8) -> bool {
    CLASS_TABLE[b as usize] & DOMAIN_END != 0
}

/// Opening punctuation that may immediately precede a URL in free text.
#[inline]
pub fn is_url_start(b: u8) -> bool {
    matches!(b, b'(' | b'{' | b'<' | b'\'')
}

/// Closing punctuation that terminates a URL in free text.
#[inline]
pub fn is_url_end(b: u8) -> bool {
    matches!(b, b')' | b'}' | b'>' | b'\'')
}
