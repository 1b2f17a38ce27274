//! URL Scanner
//!
//! One Aho-Corasick automaton holds every registered literal. Scanning walks
//! it byte by byte; each pattern hit is handed to the grammar of its
//! [`MatcherKind`], which decides where the URL really starts and ends. The
//! first hit accepted by its grammar is returned.
//!
//! The scanner is immutable once built and can be shared between threads.
//! Per-scan state lives in a [`ScanCursor`] owned by the caller.

use std::path::{Path, PathBuf};

use aho_corasick::automaton::{Automaton, StateID};
use aho_corasick::nfa::contiguous::{Builder as NfaBuilder, NFA};
use aho_corasick::{Anchored, MatchKind};
use log::{debug, info, warn};

use crate::charset::{is_lwsp, is_url_start, is_urlsafe};
use crate::error::{BuildError, ParseError};
use crate::grammar::{
    find_bare_email, find_tld_host_end, find_tld_host_start, parse_mailto, tld_followed_by_host_end,
    web_end, Mode,
};
use crate::patterns::{MatcherKind, PatternEntry, PatternRegistry};
use crate::suffix::{load_suffix_file, parse_suffix_list, SuffixRule};
use crate::types::{PatternFlags, Span};
use crate::url::Url;

// =============================================================================
// Builder
// =============================================================================

/// Configures and builds a [`UrlScanner`].
#[derive(Debug, Default)]
pub struct ScannerBuilder {
    rules: Vec<SuffixRule>,
    files: Vec<PathBuf>,
    has_suffixes: bool,
}

impl ScannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add suffix rules from suffix list text.
    pub fn suffix_list_text(mut self, text: &str) -> Self {
        self.rules.extend(parse_suffix_list(text));
        self.has_suffixes = true;
        self
    }

    /// Add suffix rules from a file, read when the scanner is built.
    pub fn suffix_list_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self.has_suffixes = true;
        self
    }

    /// Add already parsed suffix rules.
    pub fn suffix_rules(mut self, rules: impl IntoIterator<Item = SuffixRule>) -> Self {
        self.rules.extend(rules);
        self.has_suffixes = true;
        self
    }

    /// Compile all patterns into the automaton.
    pub fn build(mut self) -> Result<UrlScanner, BuildError> {
        for path in &self.files {
            let rules = load_suffix_file(path);
            debug!("loaded {} suffix rules from {}", rules.len(), path.display());
            self.rules.extend(rules);
        }

        if !self.has_suffixes {
            warn!("no suffix list configured, only explicit URL prefixes will match");
        }

        let mut registry = PatternRegistry::with_static_patterns();
        let suffixes = registry.add_suffix_rules(&self.rules);

        let nfa = NfaBuilder::new()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(true)
            .build(registry.literals())?;
        let start = nfa.start_state(Anchored::No)?;

        info!(
            "url scanner ready: {} patterns ({} suffixes), {} bytes",
            registry.len(),
            suffixes,
            nfa.memory_usage()
        );

        Ok(UrlScanner {
            registry,
            nfa,
            start,
        })
    }
}

// =============================================================================
// Scanner
// =============================================================================

/// Automaton position carried between [`UrlScanner::find`] calls.
///
/// A fresh cursor starts at the automaton root. After an accepted match the
/// cursor is back at the root, since scanning resumes past the match.
/// When a buffer is exhausted the cursor keeps the state reached at its
/// last byte so the next buffer continues the same logical scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    state: Option<StateID>,
}

impl ScanCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the cursor is at the automaton root.
    pub fn is_start(&self) -> bool {
        self.state.is_none()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// A URL or email found in text, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Offset of the first byte in the scanned text
    pub start: usize,
    /// Offset one past the last byte in the scanned text
    pub end: usize,
    /// Matched bytes with the pattern's prefix prepended
    pub candidate: Vec<u8>,
}

/// Public suffix found in a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TldHit {
    pub span: Span,
    /// The host has a single trailing dot after the suffix
    pub trailing_dot: bool,
}

/// Compiled URL scanner.
pub struct UrlScanner {
    registry: PatternRegistry,
    nfa: NFA,
    start: StateID,
}

impl std::fmt::Debug for UrlScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlScanner")
            .field("patterns", &self.registry.len())
            .field("suffixes", &self.registry.suffix_count())
            .finish()
    }
}

impl UrlScanner {
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    #[inline]
    pub fn pattern_count(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn suffix_count(&self) -> usize {
        self.registry.suffix_count()
    }

    #[inline]
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Parse a complete URL string.
    pub fn parse(&self, raw: &[u8]) -> Result<Url, ParseError> {
        Url::parse(raw, self)
    }

    /// Find the next URL or email in `text`.
    ///
    /// Text before a hit is consumed into `cursor`. Pattern hits that began
    /// in a previous buffer are ignored.
    pub fn find(&self, text: &[u8], is_html: bool, cursor: &mut ScanCursor) -> Option<RawMatch> {
        let mut sid = cursor.state.unwrap_or(self.start);

        for (i, &b) in text.iter().enumerate() {
            sid = self.nfa.next_state(Anchored::No, sid, b);
            if !self.nfa.is_match(sid) {
                continue;
            }

            let end = i + 1;
            for k in 0..self.nfa.match_len(sid) {
                let pid = self.nfa.match_pattern(sid, k);
                let len = self.nfa.pattern_len(pid);
                if len > end {
                    continue;
                }
                let Some(entry) = self.registry.get(pid.as_usize()) else {
                    continue;
                };

                if let Some(found) = self.try_match(text, end - len, end, entry, is_html) {
                    cursor.reset();
                    return Some(found);
                }
            }
        }

        cursor.state = Some(sid);
        None
    }

    /// Run the grammar of `entry` on a hit spanning `text[start..end]`.
    fn try_match(
        &self,
        text: &[u8],
        start: usize,
        end: usize,
        entry: &PatternEntry,
        is_html: bool,
    ) -> Option<RawMatch> {
        if is_html && entry.flags.contains(PatternFlags::NO_HTML) {
            return None;
        }
        if entry.flags.contains(PatternFlags::TLD_MATCH) && !tld_followed_by_host_end(text, end) {
            return None;
        }

        let (begin, fin) = match entry.kind {
            MatcherKind::File => file_bounds(text, start, end)?,
            MatcherKind::Web => web_bounds(text, start)?,
            MatcherKind::Email => email_bounds(text, start, entry)?,
            MatcherKind::Tld => {
                let begin = find_tld_host_start(text, start)?;
                (begin, find_tld_host_end(text, begin, end)?)
            }
        };

        let mut candidate = Vec::with_capacity(entry.prefix.len() + fin - begin);
        candidate.extend_from_slice(entry.prefix.as_bytes());
        candidate.extend_from_slice(&text[begin..fin]);

        Some(RawMatch {
            start: begin,
            end: fin,
            candidate,
        })
    }

    /// Locate the public suffix of `host`.
    ///
    /// The suffix must end the host, optionally followed by one dot. A
    /// wildcard rule also covers the label in front of it.
    pub fn find_tld(&self, host: &[u8]) -> Option<Span> {
        self.lookup_tld(host).map(|hit| hit.span)
    }

    pub(crate) fn lookup_tld(&self, host: &[u8]) -> Option<TldHit> {
        let mut sid = self.start;

        for (i, &b) in host.iter().enumerate() {
            sid = self.nfa.next_state(Anchored::No, sid, b);
            if !self.nfa.is_match(sid) {
                continue;
            }

            let end = i + 1;
            let trailing_dot = match host.len() - end {
                0 => false,
                1 if host[end] == b'.' => true,
                _ => continue,
            };

            // Longest suffix is reported first
            for k in 0..self.nfa.match_len(sid) {
                let pid = self.nfa.match_pattern(sid, k);
                let Some(entry) = self.registry.get(pid.as_usize()) else {
                    continue;
                };
                if !entry.flags.contains(PatternFlags::TLD_MATCH) {
                    continue;
                }

                let dot = end - self.nfa.pattern_len(pid);
                let mut begin = dot + 1;
                if entry.flags.contains(PatternFlags::STAR_MATCH) {
                    begin = host[..dot].iter().rposition(|&c| c == b'.').map_or(0, |d| d + 1);
                }

                return Some(TldHit {
                    span: Span::between(begin, end),
                    trailing_dot,
                });
            }
        }

        None
    }
}

// =============================================================================
// Match bounds
// =============================================================================

/// Closing counterpart of an opening bracket.
fn closing_bracket(b: u8) -> Option<u8> {
    match b {
        b'(' => Some(b')'),
        b'{' => Some(b'}'),
        b'[' => Some(b']'),
        b'<' => Some(b'>'),
        b'\'' => Some(b'\''),
        _ => None,
    }
}

/// `file://` runs over URL-safe bytes and slashes, up to the bracket that
/// opened it if any.
fn file_bounds(text: &[u8], start: usize, end: usize) -> Option<(usize, usize)> {
    let stop = start
        .checked_sub(1)
        .and_then(|i| closing_bracket(text[i]));

    let mut p = end;
    while p < text.len() && Some(text[p]) != stop && (is_urlsafe(text[p]) || text[p] == b'/') {
        p += 1;
    }

    (p > end).then_some((start, p))
}

/// Explicit schemes and bare `www.`/`ftp.` hosts.
fn web_bounds(text: &[u8], start: usize) -> Option<(usize, usize)> {
    let rest = &text[start..];

    let bare = rest.len() >= 3
        && (rest[..3].eq_ignore_ascii_case(b"www") || rest[..3].eq_ignore_ascii_case(b"ftp"));

    if bare && start > 0 {
        // Bare host must be a word of its own
        let prev = text[start - 1];
        if !is_url_start(prev) && !is_lwsp(prev) {
            return None;
        }
    }
    if rest.first() == Some(&b'.') {
        return None;
    }

    web_end(rest).map(|len| (start, start + len))
}

/// `mailto:` URLs and bare `@`.
fn email_bounds(text: &[u8], start: usize, entry: &PatternEntry) -> Option<(usize, usize)> {
    if entry.prefix.is_empty() {
        let parsed = parse_mailto(&text[start..], Mode::Lenient).ok()?;
        parsed.user?;
        return Some((start, start + parsed.end));
    }

    let span = find_bare_email(text, start)?;
    Some((span.off, span.end()))
}
