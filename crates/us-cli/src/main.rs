//! urlsift CLI
//!
//! CLI tool for extracting URLs from text and inspecting suffix lists.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use us_core::{Extraction, Url, UrlFlags, UrlScanner};

#[derive(Parser)]
#[command(name = "us-cli")]
#[command(about = "urlsift URL and email extraction tools")]
struct Cli {
    /// Public suffix list file
    #[arg(short, long, global = true)]
    suffixes: Option<PathBuf>,

    /// Log to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract URLs and emails from a text file
    Extract {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Treat the input as HTML text
        #[arg(long)]
        html: bool,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Parse URLs given on the command line
    Parse {
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Look up the public suffix of host names
    Tld {
        #[arg(required = true)]
        hosts: Vec<String>,
    },
}

// =============================================================================
// Logging
// =============================================================================

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    }
}

/// Route `log` records from the core through a stderr subscriber.
fn init_logging(verbose: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Serialize)]
struct UrlReport {
    url: String,
    protocol: &'static str,
    scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
    tld: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrable_domain: Option<String>,
    flags: Vec<&'static str>,
}

#[derive(Serialize)]
struct SpanReport {
    offset: usize,
    len: usize,
}

#[derive(Serialize)]
struct ExtractReport {
    urls: Vec<UrlReport>,
    emails: Vec<UrlReport>,
    spans: Vec<SpanReport>,
}

#[derive(Serialize)]
struct ParseReport {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<UrlReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn non_empty(bytes: &[u8]) -> Option<String> {
    (!bytes.is_empty()).then(|| text(bytes))
}

fn flag_names(flags: UrlFlags) -> Vec<&'static str> {
    let mut names = Vec::new();
    if flags.contains(UrlFlags::PHISHED) {
        names.push("phished");
    }
    if flags.contains(UrlFlags::NUMERIC) {
        names.push("numeric");
    }
    if flags.contains(UrlFlags::OBSCURED) {
        names.push("obscured");
    }
    names
}

impl From<&Url> for UrlReport {
    fn from(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            protocol: url.protocol().as_str(),
            scheme: text(url.scheme()),
            user: non_empty(url.user()),
            host: text(url.host()),
            port: url.port(),
            path: non_empty(url.path()),
            query: non_empty(url.query()),
            fragment: non_empty(url.fragment()),
            tld: text(url.tld()),
            registrable_domain: url.registrable_domain().map(text),
            flags: flag_names(url.flags()),
        }
    }
}

impl From<&Extraction> for ExtractReport {
    fn from(found: &Extraction) -> Self {
        Self {
            urls: found.urls.iter().map(UrlReport::from).collect(),
            emails: found.emails.iter().map(UrlReport::from).collect(),
            spans: found
                .spans
                .iter()
                .map(|s| SpanReport {
                    offset: s.offset,
                    len: s.len,
                })
                .collect(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn print_url(url: &Url) {
    let report = UrlReport::from(url);
    println!("{}", report.url);
    println!("  Protocol:    {}", report.protocol);
    if let Some(user) = &report.user {
        println!("  User:        {}", user);
    }
    println!("  Host:        {}", report.host);
    if let Some(port) = report.port {
        println!("  Port:        {}", port);
    }
    if let Some(path) = &report.path {
        println!("  Path:        {}", path);
    }
    if let Some(query) = &report.query {
        println!("  Query:       {}", query);
    }
    if let Some(fragment) = &report.fragment {
        println!("  Fragment:    {}", fragment);
    }
    println!("  TLD:         {}", report.tld);
    if !report.flags.is_empty() {
        println!("  Flags:       {}", report.flags.join(", "));
    }
}

// =============================================================================
// Commands
// =============================================================================

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = build_scanner(cli.suffixes).and_then(|scanner| match cli.command {
        Commands::Extract { input, html, json } => cmd_extract(&scanner, &input, html, json),
        Commands::Parse { urls, json } => cmd_parse(&scanner, &urls, json),
        Commands::Tld { hosts } => cmd_tld(&scanner, &hosts),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_scanner(suffixes: Option<PathBuf>) -> Result<UrlScanner, String> {
    let mut builder = UrlScanner::builder();
    if let Some(path) = suffixes {
        if !path.is_file() {
            return Err(format!("Suffix list '{}' not found", path.display()));
        }
        builder = builder.suffix_list_file(path);
    }

    builder.build().map_err(|e| e.to_string())
}

fn read_input(input: &str) -> Result<Vec<u8>, String> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(buf);
    }

    fs::read(input).map_err(|e| format!("Failed to read '{}': {}", input, e))
}

fn cmd_extract(scanner: &UrlScanner, input: &str, html: bool, json: bool) -> Result<(), String> {
    let content = read_input(input)?;

    let start = Instant::now();
    let found = scanner.extract(&content, html);
    let elapsed = start.elapsed();

    if json {
        return print_json(&ExtractReport::from(&found));
    }

    println!("URLs ({}):", found.urls.len());
    for url in &found.urls {
        println!("  {}", url);
    }
    println!("Emails ({}):", found.emails.len());
    for email in &found.emails {
        println!("  {}", email);
    }
    println!("Matches ({}):", found.spans.len());
    for span in &found.spans {
        let end = (span.offset + span.len).min(content.len());
        println!("  {:>8} +{:<4} {}", span.offset, span.len, text(&content[span.offset..end]));
    }
    println!(
        "Scanned {} bytes in {:.2}ms",
        content.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}

fn cmd_parse(scanner: &UrlScanner, inputs: &[String], json: bool) -> Result<(), String> {
    let mut reports = Vec::with_capacity(inputs.len());

    for input in inputs {
        let parsed = scanner.parse(input.as_bytes());

        if json {
            reports.push(match &parsed {
                Ok(url) => ParseReport {
                    input: input.clone(),
                    url: Some(UrlReport::from(url)),
                    error: None,
                },
                Err(e) => ParseReport {
                    input: input.clone(),
                    url: None,
                    error: Some(e.as_str()),
                },
            });
            continue;
        }

        match parsed {
            Ok(url) => print_url(&url),
            Err(e) => println!("{}\n  Error:       {}", input, e),
        }
    }

    if json {
        print_json(&reports)?;
    }

    Ok(())
}

fn cmd_tld(scanner: &UrlScanner, hosts: &[String]) -> Result<(), String> {
    if scanner.suffix_count() == 0 {
        return Err("No suffix rules loaded, pass --suffixes".to_string());
    }

    for host in hosts {
        let lower = host.to_lowercase();
        match scanner.find_tld(lower.as_bytes()) {
            Some(span) => println!("{}\t{}", host, text(span.slice(lower.as_bytes()))),
            None => println!("{}\t-", host),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn scanner() -> UrlScanner {
        UrlScanner::builder()
            .suffix_list_text("com\norg\nco.uk\n")
            .build()
            .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["us-cli", "-vv", "tld", "a.com"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(log_filter(0), "error");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(cli.verbose), "debug");
        assert_eq!(log_filter(7), "debug");
    }

    #[test]
    fn test_global_suffixes_flag() {
        let cli = Cli::try_parse_from(["us-cli", "tld", "example.com", "--suffixes", "list.dat"]).unwrap();
        assert_eq!(cli.suffixes, Some(PathBuf::from("list.dat")));
        assert!(matches!(cli.command, Commands::Tld { .. }));
    }

    #[test]
    fn test_url_report() {
        let url = scanner().parse(b"http://user@www.Example.co.uk:8080/a?b#c").unwrap();
        let report = UrlReport::from(&url);
        assert_eq!(report.protocol, "http");
        assert_eq!(report.user.as_deref(), Some("user"));
        assert_eq!(report.host, "www.example.co.uk");
        assert_eq!(report.port, Some(8080));
        assert_eq!(report.tld, "co.uk");
        assert_eq!(report.registrable_domain.as_deref(), Some("example.co.uk"));
        assert!(report.flags.is_empty());
    }

    #[test]
    fn test_extract_report_json() {
        let found = scanner().extract(b"mail a@b.org or see http://127.1/", false);
        let value = serde_json::to_value(ExtractReport::from(&found)).unwrap();

        assert_eq!(value["emails"][0]["user"], "a");
        assert_eq!(value["urls"][0]["host"], "127.0.0.1");
        assert_eq!(value["urls"][0]["flags"], serde_json::json!(["numeric", "obscured"]));
        assert_eq!(value["spans"].as_array().unwrap().len(), 2);
        assert!(value["urls"][0].get("user").is_none());
    }
}
