//! Pattern registry
//!
//! Ordered list of literals the scanner looks for: explicit URL prefixes,
//! bare `www.`/`ftp.` hosts, the `@` of an email address, and one `.suffix`
//! entry per public suffix. The pattern id reported by the automaton is the
//! index into this list.

use crate::suffix::SuffixRule;
use crate::types::PatternFlags;

/// Grammar that validates a match and finds its boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    /// `file://` prefix
    File,
    /// Generic `scheme://` URL or bare `www.`/`ftp.` host
    Web,
    /// `mailto:` URL or bare `@`
    Email,
    /// Public suffix hit in the middle of text
    Tld,
}

/// A single pattern registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub literal: String,
    /// Prepended to the matched text before parsing (`www.` -> `http://`)
    pub prefix: &'static str,
    pub kind: MatcherKind,
    pub flags: PatternFlags,
}

/// Compile-time form of a registry entry.
#[derive(Debug, Clone, Copy)]
pub struct StaticPattern {
    pub literal: &'static str,
    pub prefix: &'static str,
    pub kind: MatcherKind,
    pub flags: PatternFlags,
}

impl StaticPattern {
    const fn new(
        literal: &'static str,
        prefix: &'static str,
        kind: MatcherKind,
        flags: PatternFlags,
    ) -> Self {
        Self {
            literal,
            prefix,
            kind,
            flags,
        }
    }
}

const NONE: PatternFlags = PatternFlags::empty();
const NO_HTML: PatternFlags = PatternFlags::NO_HTML;

/// Prefixes known regardless of the suffix list, in registry order.
pub const STATIC_PATTERNS: [StaticPattern; 16] = [
    StaticPattern::new("file://", "", MatcherKind::File, NONE),
    StaticPattern::new("ftp://", "", MatcherKind::Web, NONE),
    StaticPattern::new("sftp://", "", MatcherKind::Web, NONE),
    StaticPattern::new("http://", "", MatcherKind::Web, NONE),
    StaticPattern::new("https://", "", MatcherKind::Web, NONE),
    StaticPattern::new("news://", "", MatcherKind::Web, NONE),
    StaticPattern::new("nntp://", "", MatcherKind::Web, NONE),
    StaticPattern::new("telnet://", "", MatcherKind::Web, NONE),
    StaticPattern::new("webcal://", "", MatcherKind::Web, NONE),
    StaticPattern::new("mailto:", "", MatcherKind::Email, NONE),
    StaticPattern::new("callto://", "", MatcherKind::Web, NONE),
    StaticPattern::new("h323:", "", MatcherKind::Web, NONE),
    StaticPattern::new("sip:", "", MatcherKind::Web, NONE),
    StaticPattern::new("www.", "http://", MatcherKind::Web, NO_HTML),
    StaticPattern::new("ftp.", "ftp://", MatcherKind::Web, NO_HTML),
    // Likely emails
    StaticPattern::new("@", "mailto://", MatcherKind::Email, NO_HTML),
];

/// Ordered pattern list, static prefixes first.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

impl PatternRegistry {
    /// Registry holding only the static prefixes.
    pub fn with_static_patterns() -> Self {
        let entries = STATIC_PATTERNS
            .iter()
            .map(|p| PatternEntry {
                literal: p.literal.to_string(),
                prefix: p.prefix,
                kind: p.kind,
                flags: p.flags,
            })
            .collect();

        Self { entries }
    }

    /// Append public suffix entries. Returns the number of entries added.
    pub fn add_suffix_rules(&mut self, rules: &[SuffixRule]) -> usize {
        let before = self.entries.len();

        for rule in rules {
            if let Some(literal) = rule.pattern() {
                self.entries.push(PatternEntry {
                    literal,
                    prefix: "http://",
                    kind: MatcherKind::Tld,
                    flags: rule.pattern_flags(),
                });
            }
        }

        self.entries.len() - before
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&PatternEntry> {
        self.entries.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn literals(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|e| e.literal.as_bytes())
    }

    /// Number of public suffix entries.
    pub fn suffix_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.flags.contains(PatternFlags::TLD_MATCH))
            .count()
    }
}
