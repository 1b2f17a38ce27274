//! urlsift Core Library
//!
//! This crate finds URLs and email addresses in arbitrary message text and
//! breaks them down into normalized components. It is built for hostile
//! input: obfuscated hosts, broken encodings and text that only looks like
//! a link.
//!
//! # Architecture
//!
//! A single Aho-Corasick automaton is compiled from a fixed set of URL
//! prefixes (`http://`, `mailto:`, `www.`, `@`, ...) plus one entry per public
//! suffix. Each automaton hit is checked by a small hand-written grammar that
//! finds the real boundaries of the URL. Accepted candidates are parsed into
//! [`Url`] records, percent-decoded and case-folded in place.
//!
//! # Modules
//!
//! - `charset`: Byte classification table
//! - `types`: Protocols, flags and spans
//! - `suffix`: Public Suffix List loading
//! - `patterns`: Ordered pattern registry
//! - `grammar`: Web, mailto, bare email and bare host grammars
//! - `numeric`: IPv4/IPv6 and obscured numeric hosts
//! - `decode`: Percent-decoding
//! - `url`: Parsed URL record
//! - `scanner`: Automaton construction and match search
//! - `extract`: Text extraction driver
//!
//! # Example
//!
//! ```
//! use us_core::UrlScanner;
//!
//! let scanner = UrlScanner::builder()
//!     .suffix_list_text("com\norg\n")
//!     .build()
//!     .unwrap();
//!
//! let found = scanner.extract(b"see http://Example.com/a and bob@example.org", false);
//! assert_eq!(found.urls.len(), 1);
//! assert_eq!(found.emails.len(), 1);
//! ```

pub mod charset;
pub mod decode;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod numeric;
pub mod patterns;
pub mod scanner;
pub mod suffix;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use error::{BuildError, ParseError};
pub use extract::{Extraction, UrlIter, UrlSet};
pub use scanner::{RawMatch, ScanCursor, ScannerBuilder, UrlScanner};
pub use suffix::{load_suffix_file, parse_suffix_list, SuffixKind, SuffixRule};
pub use types::{MatchSpan, Protocol, Span, UrlFlags};
pub use url::{Field, Url};
