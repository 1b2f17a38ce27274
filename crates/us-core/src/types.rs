//! Core type definitions for urlsift
//!
//! These types are shared between the grammars, the URL record builder and
//! the text extraction driver.

// =============================================================================
// Protocols
// =============================================================================

/// Protocol of a parsed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Protocol {
    File = 0,
    Ftp = 1,
    Http = 2,
    Https = 3,
    Mailto = 4,
    Unknown = 5,
}

impl Protocol {
    const KNOWN: [(Protocol, &'static [u8]); 5] = [
        (Protocol::File, b"file"),
        (Protocol::Ftp, b"ftp"),
        (Protocol::Http, b"http"),
        (Protocol::Https, b"https"),
        (Protocol::Mailto, b"mailto"),
    ];

    /// Map an already lowercased scheme to a protocol.
    /// Compares the length first, then the bytes.
    pub fn from_scheme(scheme: &[u8]) -> Self {
        for (proto, name) in Self::KNOWN {
            if scheme.len() == name.len() && scheme == name {
                return proto;
            }
        }
        Protocol::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::File => "file",
            Protocol::Ftp => "ftp",
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Mailto => "mailto",
            Protocol::Unknown => "unknown",
        }
    }
}

// =============================================================================
// URL Flags
// =============================================================================

bitflags::bitflags! {
    /// Flags attached to a parsed URL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UrlFlags: u8 {
        /// Displayed text points somewhere else than the link target
        const PHISHED = 1 << 0;
        /// Host is an IP address
        const NUMERIC = 1 << 1;
        /// Host is a non-canonical numeric form (e.g. `2130706433`)
        const OBSCURED = 1 << 2;
    }
}

// =============================================================================
// Pattern Flags
// =============================================================================

bitflags::bitflags! {
    /// Flags of a pattern registry entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFlags: u8 {
        /// Not matched inside HTML text parts
        const NO_HTML = 1 << 0;
        /// Public suffix entry
        const TLD_MATCH = 1 << 1;
        /// Wildcard suffix (`*.ck`), covers one more label
        const STAR_MATCH = 1 << 2;
    }
}

// =============================================================================
// Spans
// =============================================================================

/// Offset and length of a component inside a URL buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub off: usize,
    pub len: usize,
}

impl Span {
    #[inline]
    pub const fn new(off: usize, len: usize) -> Self {
        Self { off, len }
    }

    /// Span covering `[start, end)`.
    #[inline]
    pub const fn between(start: usize, end: usize) -> Self {
        Self { off: start, len: end - start }
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.off + self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.off..self.end()]
    }
}

/// Location of a detected URL or email in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub offset: usize,
    pub len: usize,
}
