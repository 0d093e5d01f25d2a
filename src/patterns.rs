//! Pattern sets that drive fragment classification
//!
//! A [`PatternSet`] bundles the three regular expressions the detector
//! consults. Variants differ only in these patterns; the scanning algorithm
//! is shared.

use crate::error::{ParseError, Result};
use crate::types::Message;
use regex::{Matches, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `On <date>, <name> wrote:`, possibly wrapped over several lines but
/// never across a blank line
const STANDARD_MULTI_QUOTE_HEADER: &str = r"(?m)^On[ \t](?:[^\n]|\n[^\n])*?\n?wrote:";

const STANDARD_QUOTED_LINE: &str = r">+";

const STANDARD_SIGNATURE: &str = r"--|__|-\w|Sent from my (\w+\s*){1,3}";

/// Plain-text original-message blocks run to the end of the body
const GATEWAY_MULTI_QUOTE_HEADER: &str = concat!(
    r"(?ms)^(?:On[ \t](?:[^\n]|\n[^\n])*?\n?wrote:",
    r"|From:\s.*?Sent:\s.*?To:\s.*?Subject:\s.*?\z",
    r"|From:\s.*?To:\s.*?Subject:\s.*?Date:\s.*?\z",
    r"|From:\s.*?Subject:\s.*?To:\s.*?Date:\s.*?\z)",
);

const GATEWAY_QUOTED_LINE: &str = concat!(
    r">+",
    r"|From:\s.*?Sent:\s.*?To:\s.*?Subject:",
    r"|From:\s.*?To:\s.*?Subject:\s.*?Date:",
    r"|From:\s.*?Subject:\s.*?To:\s.*?Date:",
);

const GATEWAY_SIGNATURE: &str = concat!(
    r"--|__|-\w",
    r"|Sent from my (\w+\s*){1,3}",
    r"|Sent from Samsung Mobile",
    r"|\*{9,}$",
    r"|[\w ]*[Rr]egards,?$",
    r"|[\w ]*[Tt]hanks,?$",
    r"|This email is intended for the addressee\(s\) named above",
    r"|This email is confidential and may also be privileged\. If you are not the i",
    r"|E-MAIL DISCLAIMER",
);

static STANDARD: LazyLock<PatternSet> = LazyLock::new(|| {
    Variant::Standard
        .compile()
        .expect("standard patterns are valid regular expressions")
});

static GATEWAY: LazyLock<PatternSet> = LazyLock::new(|| {
    Variant::Gateway
        .compile()
        .expect("gateway patterns are valid regular expressions")
});

/// Which of the three patterns in a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Searched across the whole body to find original-message header blocks
    MultiQuoteHeader,
    /// Matched at the start of each line to mark it as quoted
    QuotedLine,
    /// Matched at the start of each line to mark the start of a signature
    Signature,
}

impl PatternKind {
    pub const ALL: [Self; 3] = [Self::MultiQuoteHeader, Self::QuotedLine, Self::Signature];

    /// Per-line patterns only match at the start of the line
    const fn is_line_anchored(self) -> bool {
        !matches!(self, Self::MultiQuoteHeader)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultiQuoteHeader => write!(f, "multi-quote header"),
            Self::QuotedLine => write!(f, "quoted line"),
            Self::Signature => write!(f, "signature"),
        }
    }
}

/// Built-in mail conventions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// `>` quoting, `On ... wrote:` preambles and `--` style signatures
    #[default]
    #[serde(alias = "default")]
    Standard,

    /// Standard rules plus plain-text `From:`/`Sent:`/`To:`/`Subject:`
    /// header blocks (as sent by nhs.net and similar gateways) and common
    /// sign-off and disclaimer boilerplate
    #[serde(alias = "nhsnet")]
    Gateway,
}

impl Variant {
    /// Regular expression source for one pattern of this variant
    #[must_use]
    pub const fn source(self, kind: PatternKind) -> &'static str {
        match (self, kind) {
            (Self::Standard, PatternKind::MultiQuoteHeader) => STANDARD_MULTI_QUOTE_HEADER,
            (Self::Standard, PatternKind::QuotedLine) => STANDARD_QUOTED_LINE,
            (Self::Standard, PatternKind::Signature) => STANDARD_SIGNATURE,
            (Self::Gateway, PatternKind::MultiQuoteHeader) => GATEWAY_MULTI_QUOTE_HEADER,
            (Self::Gateway, PatternKind::QuotedLine) => GATEWAY_QUOTED_LINE,
            (Self::Gateway, PatternKind::Signature) => GATEWAY_SIGNATURE,
        }
    }

    /// Compiled patterns for this variant, shared and read-only
    #[must_use]
    pub fn patterns(self) -> &'static PatternSet {
        match self {
            Self::Standard => &STANDARD,
            Self::Gateway => &GATEWAY,
        }
    }

    /// Split `text` into fragments using this variant's patterns
    #[must_use]
    pub fn parse(self, text: &str) -> Message {
        crate::parser::parse(text, self.patterns())
    }

    /// Visible reply portion of `text` using this variant's patterns
    #[must_use]
    pub fn parse_reply(self, text: &str) -> String {
        self.parse(text).reply()
    }

    fn compile(self) -> Result<PatternSet> {
        PatternSet::new(
            self.source(PatternKind::MultiQuoteHeader),
            self.source(PatternKind::QuotedLine),
            self.source(PatternKind::Signature),
        )
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Gateway => write!(f, "gateway"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "default" => Ok(Self::Standard),
            "gateway" | "nhsnet" => Ok(Self::Gateway),
            other => Err(format!("Unknown pattern variant: {other}")),
        }
    }
}

/// The three compiled patterns that parameterize fragment detection
///
/// Cloning is cheap; compiled regexes are reference counted.
#[derive(Debug, Clone)]
pub struct PatternSet {
    multi_quote_header: Regex,
    quoted_line: Regex,
    signature: Regex,
}

impl PatternSet {
    /// Compile a pattern set from regular expression sources
    ///
    /// `quoted_line` and `signature` are anchored to the start of the line.
    /// `multi_quote_header` is searched across the whole body, so it should
    /// carry its own `(?m)`/`(?s)` flags if it spans lines.
    pub fn new(multi_quote_header: &str, quoted_line: &str, signature: &str) -> Result<Self> {
        Ok(Self {
            multi_quote_header: compile(PatternKind::MultiQuoteHeader, multi_quote_header)?,
            quoted_line: compile(PatternKind::QuotedLine, quoted_line)?,
            signature: compile(PatternKind::Signature, signature)?,
        })
    }

    /// Whether `line` is quoted text
    #[must_use]
    pub fn is_quoted(&self, line: &str) -> bool {
        self.quoted_line.is_match(line.trim_end())
    }

    /// Whether `line` opens a signature or disclaimer block
    #[must_use]
    pub fn is_signature_start(&self, line: &str) -> bool {
        self.signature.is_match(line.trim_end())
    }

    /// First original-message header block in `text`, if any
    #[must_use]
    pub fn find_header<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.multi_quote_header.find(text)
    }

    /// All non-overlapping header blocks in `text`
    #[must_use]
    pub fn header_matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.multi_quote_header.find_iter(text)
    }

    /// Compiled source of one pattern, including line anchoring
    #[must_use]
    pub fn as_str(&self, kind: PatternKind) -> &str {
        match kind {
            PatternKind::MultiQuoteHeader => self.multi_quote_header.as_str(),
            PatternKind::QuotedLine => self.quoted_line.as_str(),
            PatternKind::Signature => self.signature.as_str(),
        }
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Variant::Standard.patterns().clone()
    }
}

fn compile(pattern: PatternKind, source: &str) -> Result<Regex> {
    let invalid = |source| ParseError::InvalidPattern { pattern, source };

    // Validate the bare source first; wrapping can make an unbalanced
    // group parse.
    let regex = Regex::new(source).map_err(invalid)?;
    if pattern.is_line_anchored() {
        Regex::new(&format!("^(?:{source})")).map_err(invalid)
    } else {
        Ok(regex)
    }
}
