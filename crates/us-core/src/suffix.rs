//! Public Suffix List loading
//!
//! The suffix list is a line-oriented text file in the publicsuffix.org
//! format. Every usable rule is turned into a `.suffix` pattern for the
//! scanner automaton.
//!
//! # Examples
//!
//! ```
//! use us_core::suffix::{parse_suffix_list, SuffixKind};
//!
//! let rules = parse_suffix_list("// comment\ncom\n*.ck\n!www.ck\n");
//! assert_eq!(rules.len(), 3);
//! assert_eq!(rules[1].kind, SuffixKind::Wildcard);
//! assert_eq!(rules[1].suffix, "ck");
//! ```

use std::fs;
use std::path::Path;

use log::{debug, error, warn};

use crate::types::PatternFlags;

/// Kind of a suffix list rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    /// Plain rule (e.g. `com`, `co.uk`)
    Exact,
    /// `*.ck` stored as `ck`, covers one more label
    Wildcard,
    /// `!www.ck` stored as `www.ck`. Accepted but has no effect on matching.
    Exception,
}

/// A single suffix list rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixRule {
    pub kind: SuffixKind,
    pub suffix: String,
}

impl SuffixRule {
    pub fn exact(suffix: &str) -> Self {
        Self {
            kind: SuffixKind::Exact,
            suffix: suffix.to_string(),
        }
    }

    /// Pattern registered in the automaton, `None` for inert rules.
    pub fn pattern(&self) -> Option<String> {
        match self.kind {
            SuffixKind::Exception => None,
            SuffixKind::Exact | SuffixKind::Wildcard => Some(format!(".{}", self.suffix)),
        }
    }

    pub fn pattern_flags(&self) -> PatternFlags {
        let flags = PatternFlags::NO_HTML | PatternFlags::TLD_MATCH;
        match self.kind {
            SuffixKind::Wildcard => flags | PatternFlags::STAR_MATCH,
            _ => flags,
        }
    }
}

/// Parse suffix list text into rules.
pub fn parse_suffix_list(text: &str) -> Vec<SuffixRule> {
    let mut rules = Vec::new();

    for raw_line in text.lines() {
        if let Some(rule) = parse_suffix_line(raw_line) {
            rules.push(rule);
        }
    }

    rules
}

fn parse_suffix_line(raw_line: &str) -> Option<SuffixRule> {
    // Comments and blank lines
    match raw_line.as_bytes().first() {
        None => return None,
        Some(b) if *b == b'/' || b.is_ascii_whitespace() => return None,
        _ => {}
    }

    let line = raw_line.trim_end();

    if let Some(rest) = line.strip_prefix('!') {
        debug!("exception suffix rules are not applied: {}", line);
        return Some(SuffixRule {
            kind: SuffixKind::Exception,
            suffix: rest.to_string(),
        });
    }

    if line.starts_with('*') {
        return match line.find('.') {
            Some(dot) if dot + 1 < line.len() => Some(SuffixRule {
                kind: SuffixKind::Wildcard,
                suffix: line[dot + 1..].to_string(),
            }),
            _ => {
                warn!("got bad star line, skip it: {}", line);
                None
            }
        };
    }

    Some(SuffixRule::exact(line))
}

/// Read and parse a suffix list file.
///
/// An unreadable file is logged and yields no rules: URL matching keeps
/// working, limited to explicit prefixes and numeric hosts.
pub fn load_suffix_file(path: &Path) -> Vec<SuffixRule> {
    match fs::read_to_string(path) {
        Ok(text) => parse_suffix_list(&text),
        Err(e) => {
            error!("cannot open TLD file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Suffix list shared by the crate's tests.
    pub(crate) const TEST_SUFFIXES: &str = "\
// ===BEGIN ICANN DOMAINS===
com
net
org
bar
uk
co.uk
ru
*.ck
!www.ck

// local test suffixes
рф
";

    #[test]
    fn test_parse_rules() {
        let rules = parse_suffix_list(TEST_SUFFIXES);
        assert_eq!(rules.len(), 10);
        assert_eq!(rules[0], SuffixRule::exact("com"));
        assert_eq!(rules[5], SuffixRule::exact("co.uk"));
        assert_eq!(rules[7].kind, SuffixKind::Wildcard);
        assert_eq!(rules[7].suffix, "ck");
        assert_eq!(rules[8].kind, SuffixKind::Exception);
        assert_eq!(rules[8].suffix, "www.ck");
        assert_eq!(rules[9].suffix, "рф");
    }

    #[test]
    fn test_patterns() {
        let rules = parse_suffix_list("com\n*.ck\n!www.ck\n");
        assert_eq!(rules[0].pattern().as_deref(), Some(".com"));
        assert_eq!(rules[1].pattern().as_deref(), Some(".ck"));
        assert_eq!(rules[2].pattern(), None);
        assert!(rules[1].pattern_flags().contains(PatternFlags::STAR_MATCH));
        assert!(!rules[0].pattern_flags().contains(PatternFlags::STAR_MATCH));
        assert!(rules[0].pattern_flags().contains(PatternFlags::NO_HTML | PatternFlags::TLD_MATCH));
    }

    #[test]
    fn test_skips_comments_and_bad_lines() {
        let rules = parse_suffix_list("// c\n\n  indented\n*\n*nodot\nnet  \r\n");
        assert_eq!(rules, vec![SuffixRule::exact("net")]);
    }

    #[test]
    fn test_missing_file_is_not_fatal() {
        let rules = load_suffix_file(Path::new("/nonexistent/effective_tld_names.dat"));
        assert!(rules.is_empty());
    }
}
