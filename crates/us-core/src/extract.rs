//! Text extraction
//!
//! Finds every URL and email address in a text part. Candidates that fail
//! to parse are logged and skipped; scanning always goes on past them.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::charset::is_lwsp;
use crate::error::ParseError;
use crate::scanner::{ScanCursor, UrlScanner};
use crate::types::{MatchSpan, Protocol};
use crate::url::Url;

// =============================================================================
// Collections
// =============================================================================

/// Insertion-ordered set of URLs, keyed by their normalized bytes.
#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    urls: Vec<Url>,
    index: HashMap<Vec<u8>, usize>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `url` unless an identical one is present. Returns true if it
    /// was added.
    pub fn insert(&mut self, url: Url) -> bool {
        if self.index.contains_key(url.as_bytes()) {
            return false;
        }
        self.index.insert(url.as_bytes().to_vec(), self.urls.len());
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &[u8]) -> bool {
        self.index.contains_key(url)
    }

    pub fn get(&self, url: &[u8]) -> Option<&Url> {
        self.index.get(url).map(|&i| &self.urls[i])
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Url> {
        self.urls.iter()
    }

    pub fn into_vec(self) -> Vec<Url> {
        self.urls
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a Url;
    type IntoIter = std::slice::Iter<'a, Url>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

/// Everything found in one text part.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub urls: UrlSet,
    pub emails: UrlSet,
    /// Location of every parsed match, in text order
    pub spans: Vec<MatchSpan>,
}

// =============================================================================
// Lazy iteration
// =============================================================================

fn trim_lwsp(mut bytes: &[u8]) -> &[u8] {
    while let Some((&first, rest)) = bytes.split_first() {
        if !is_lwsp(first) {
            break;
        }
        bytes = rest;
    }
    while let Some((&last, rest)) = bytes.split_last() {
        if !is_lwsp(last) {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Iterator over the URLs and emails in a text, with their match spans.
pub struct UrlIter<'a> {
    scanner: &'a UrlScanner,
    text: &'a [u8],
    pos: usize,
    is_html: bool,
    cursor: ScanCursor,
}

impl<'a> UrlIter<'a> {
    /// Continue a scan that stopped at the end of a previous buffer.
    pub fn with_cursor(mut self, cursor: ScanCursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Cursor to hand to the scan of the next buffer.
    pub fn into_cursor(self) -> ScanCursor {
        self.cursor
    }
}

impl Iterator for UrlIter<'_> {
    type Item = (MatchSpan, Url);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let base = self.pos;
            let Some(found) = self.scanner.find(&self.text[base..], self.is_html, &mut self.cursor) else {
                self.pos = self.text.len();
                break;
            };

            // Resume one byte past the match
            self.pos = (base + found.end + 1).min(self.text.len());

            let span = MatchSpan {
                offset: base + found.start,
                len: found.end - found.start,
            };
            let candidate = trim_lwsp(&found.candidate);

            match self.scanner.parse(candidate) {
                Ok(url) if url.protocol() == Protocol::Mailto && url.user().is_empty() => {
                    debug!("skip mailto url '{}' without a user", url)
                }
                Ok(url) => return Some((span, url)),
                Err(e) => info!(
                    "extract of url '{}' failed: {}",
                    String::from_utf8_lossy(candidate),
                    e
                ),
            }
        }

        None
    }
}

// =============================================================================
// Scanner entry points
// =============================================================================

impl UrlScanner {
    /// Lazily iterate over the URLs and emails in `text`.
    pub fn urls<'a>(&'a self, text: &'a [u8], is_html: bool) -> UrlIter<'a> {
        UrlIter {
            scanner: self,
            text,
            pos: 0,
            is_html,
            cursor: ScanCursor::new(),
        }
    }

    /// First URL found inside a query string.
    fn find_in_query(&self, query: &[u8], is_html: bool) -> Option<Result<Url, ParseError>> {
        let mut cursor = ScanCursor::new();
        let found = self.find(query, is_html, &mut cursor)?;
        Some(self.parse(trim_lwsp(&found.candidate)))
    }

    /// Extract all URLs and emails from one text part.
    pub fn extract(&self, text: &[u8], is_html: bool) -> Extraction {
        let mut out = Extraction::default();
        self.extract_into(text, is_html, &mut ScanCursor::new(), &mut out);
        out
    }

    /// Extract into existing collections. `cursor` carries the automaton
    /// state from and to neighbouring buffers of the same text.
    pub fn extract_into(&self, text: &[u8], is_html: bool, cursor: &mut ScanCursor, out: &mut Extraction) {
        if text.is_empty() {
            warn!("got empty text part");
            return;
        }

        let mut iter = self.urls(text, is_html).with_cursor(*cursor);

        for (span, url) in iter.by_ref() {
            out.spans.push(span);

            // Embedded URL, one level deep
            let nested = match url.query() {
                [] => None,
                query => self.find_in_query(query, is_html).and_then(Result::ok),
            };

            if url.protocol() == Protocol::Mailto {
                out.emails.insert(url);
            } else {
                out.urls.insert(url);
            }

            if let Some(nested) = nested {
                debug!("found url {} in a query string", nested);
                out.urls.insert(nested);
            }
        }

        *cursor = iter.into_cursor();
    }
}
