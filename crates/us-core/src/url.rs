//! Parsed URL record
//!
//! A [`Url`] owns a single normalized buffer. Components are stored as
//! offset/length pairs into it, in structural order. Normalization steps that
//! change a component's length (percent-decoding, Unicode case folding,
//! numeric host canonicalization, trailing dot removal) go through
//! [`Url::replace_field`], which moves every later component along with the
//! bytes.

use std::fmt;

use crate::decode::{needs_decoding, percent_decode};
use crate::error::ParseError;
use crate::grammar::{parse_mailto, parse_web, Components, Mode};
use crate::numeric::parse_numeric_host;
use crate::scanner::UrlScanner;
use crate::types::{Protocol, Span, UrlFlags};

/// URL component, in buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Field {
    Scheme = 0,
    User = 1,
    Host = 2,
    Path = 3,
    Query = 4,
    Fragment = 5,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Scheme,
        Field::User,
        Field::Host,
        Field::Path,
        Field::Query,
        Field::Fragment,
    ];

    /// Components that are percent-decoded, in decoding order.
    const DECODED: [Field; 5] = [Field::Scheme, Field::Host, Field::Path, Field::Query, Field::Fragment];
}

const MAILTO_PREFIX: &[u8] = b"mailto:";

/// A parsed and normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    buf: Vec<u8>,
    fields: [Span; 6],
    tld: Span,
    port: Option<u16>,
    protocol: Protocol,
    flags: UrlFlags,
}

impl Url {
    /// Parse a complete URL string.
    ///
    /// Bytes after the point where the grammar stops (whitespace, a closing
    /// bracket) are dropped.
    pub fn parse(raw: &[u8], scanner: &UrlScanner) -> Result<Url, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }

        let components = if raw.len() > MAILTO_PREFIX.len()
            && raw[..MAILTO_PREFIX.len()].eq_ignore_ascii_case(MAILTO_PREFIX)
        {
            parse_mailto(raw, Mode::Strict)?
        } else {
            parse_web(raw, Mode::Strict)?
        };

        let mut url = Url::from_components(raw, &components);
        if url.host().is_empty() {
            return Err(ParseError::HostMissing);
        }

        for field in Field::DECODED {
            let value = url.field(field);
            if !value.is_empty() && needs_decoding(value) {
                let decoded = percent_decode(value);
                url.replace_field(field, &decoded);
            }
        }

        if let Some(scheme) = url.span_mut(Field::Scheme) {
            scheme.make_ascii_lowercase();
        }
        url.lowercase_host();
        url.protocol = Protocol::from_scheme(url.scheme());

        if let Some(hit) = scanner.lookup_tld(url.host()) {
            if hit.trailing_dot {
                let host = url.host();
                let trimmed = host[..host.len() - 1].to_vec();
                url.replace_field(Field::Host, &trimmed);
            }
            url.tld = Span::new(url.fields[Field::Host as usize].off + hit.span.off, hit.span.len);
        } else if let Some(numeric) = parse_numeric_host(url.host()) {
            url.flags |= UrlFlags::NUMERIC;
            if numeric.is_obscured() {
                url.flags |= UrlFlags::OBSCURED;
            }
            url.replace_field(Field::Host, numeric.to_canonical().as_bytes());
            url.tld = url.fields[Field::Host as usize];
        } else {
            return Err(ParseError::TldMissing);
        }

        if url.protocol == Protocol::Unknown {
            return Err(ParseError::InvalidProtocol);
        }

        Ok(url)
    }

    fn from_components(raw: &[u8], c: &Components) -> Url {
        let span = |s: Option<Span>| s.unwrap_or_default();

        Url {
            buf: raw[..c.end].to_vec(),
            fields: [
                span(c.scheme),
                span(c.user),
                span(c.host),
                span(c.path),
                span(c.query),
                span(c.fragment),
            ],
            tld: Span::default(),
            port: c.port,
            protocol: Protocol::Unknown,
            flags: UrlFlags::empty(),
        }
    }

    /// Replace the bytes of `field` and shift every later non-empty
    /// component by the length difference.
    pub fn replace_field(&mut self, field: Field, value: &[u8]) {
        let idx = field as usize;
        let old = self.fields[idx];

        self.buf.splice(old.off..old.end(), value.iter().copied());
        self.fields[idx].len = value.len();

        for later in &mut self.fields[idx + 1..] {
            if !later.is_empty() {
                later.off = later.off - old.len + value.len();
            }
        }
    }

    fn span_mut(&mut self, field: Field) -> Option<&mut [u8]> {
        let span = self.fields[field as usize];
        if span.is_empty() {
            None
        } else {
            Some(&mut self.buf[span.off..span.end()])
        }
    }

    /// Unicode case folding for valid UTF-8 hosts, ASCII otherwise.
    fn lowercase_host(&mut self) {
        match std::str::from_utf8(self.host()) {
            Ok(host) => {
                let lower = host.to_lowercase();
                if lower.as_bytes() != self.host() {
                    self.replace_field(Field::Host, lower.as_bytes());
                }
            }
            Err(_) => {
                if let Some(host) = self.span_mut(Field::Host) {
                    host.make_ascii_lowercase();
                }
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn field(&self, field: Field) -> &[u8] {
        self.fields[field as usize].slice(&self.buf)
    }

    /// Location of `field` inside [`Url::as_bytes`]. Empty if absent.
    #[inline]
    pub fn field_span(&self, field: Field) -> Span {
        self.fields[field as usize]
    }

    pub fn scheme(&self) -> &[u8] {
        self.field(Field::Scheme)
    }

    pub fn user(&self) -> &[u8] {
        self.field(Field::User)
    }

    pub fn host(&self) -> &[u8] {
        self.field(Field::Host)
    }

    pub fn path(&self) -> &[u8] {
        self.field(Field::Path)
    }

    pub fn query(&self) -> &[u8] {
        self.field(Field::Query)
    }

    pub fn fragment(&self) -> &[u8] {
        self.field(Field::Fragment)
    }

    /// Public suffix of the host, or the whole host if it is numeric.
    pub fn tld(&self) -> &[u8] {
        self.tld.slice(&self.buf)
    }

    pub fn tld_span(&self) -> Span {
        self.tld
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn flags(&self) -> UrlFlags {
        self.flags
    }

    /// The normalized URL. Two URLs are the same if these bytes are equal.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// A `mailto:` URL with a user part.
    pub fn is_email(&self) -> bool {
        self.protocol == Protocol::Mailto && !self.user().is_empty()
    }

    /// Public suffix plus one label (`example.co.uk` for `www.example.co.uk`).
    ///
    /// `None` for numeric hosts and for hosts that are a bare suffix.
    pub fn registrable_domain(&self) -> Option<&[u8]> {
        if self.flags.contains(UrlFlags::NUMERIC) || self.tld.is_empty() {
            return None;
        }

        let host_span = self.fields[Field::Host as usize];
        let host = self.host();
        let tld_start = self.tld.off - host_span.off;
        if tld_start < 2 {
            return None;
        }

        let label_start = host[..tld_start - 1]
            .iter()
            .rposition(|&b| b == b'.')
            .map_or(0, |dot| dot + 1);

        Some(&host[label_start..])
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.buf))
    }
}
