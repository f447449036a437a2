//! Sanitizers for text that ends up inside generated source comments

use once_cell::sync::Lazy;
use regex::Regex;

static UNICODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("unicode punctuation regex")
});
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Collapses free text into a single comment-safe line.
///
/// This function:
/// - Replaces smart quotes with regular quotes
/// - Replaces em-dashes with regular dashes
/// - Collapses whitespace and drops empty lines
/// - Neutralizes `*/` so the text can't close a block comment
///
/// # Examples
/// ```
/// use apigen::generation::sanitizers::sanitize_doc_line;
///
/// let output = sanitize_doc_line("Retrieve a list\n\n  of   existing\u{2014}keys");
/// assert_eq!(output, "Retrieve a list of existing-keys");
/// ```
pub fn sanitize_doc_line(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let line = UNICODE_RE.replace_all(line, |caps: &regex::Captures<'_>| {
                match &caps[0] {
                    "\u{2018}" | "\u{2019}" => "'",
                    "\u{201C}" | "\u{201D}" => "\"",
                    "\u{2014}" => "-",
                    _ => "",
                }
            });
            WS_RE.replace_all(line.trim(), " ").replace("*/", "* /")
        })
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits free text into trimmed comment lines, dropping leading and trailing
/// blank lines but keeping interior paragraph breaks.
pub fn doc_lines(input: &str) -> Vec<String> {
    input
        .trim()
        .lines()
        .map(|line| line.trim_end().replace("*/", "* /"))
        .collect()
}
