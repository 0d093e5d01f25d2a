//! Pattern configuration
//!
//! Selects a built-in [`Variant`] and optionally replaces any of its three
//! patterns. Read from JSON, for example:
//!
//! ```json
//! { "variant": "gateway", "signature": "--|Cheers,?$" }
//! ```

use crate::error::Result;
use crate::patterns::{PatternKind, PatternSet, Variant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Base convention; supplies every pattern not overridden below
    pub variant: Variant,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_quote_header: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_line: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl PatternConfig {
    /// Read a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override for one pattern, if set
    #[must_use]
    pub fn pattern(&self, kind: PatternKind) -> Option<&str> {
        match kind {
            PatternKind::MultiQuoteHeader => self.multi_quote_header.as_deref(),
            PatternKind::QuotedLine => self.quoted_line.as_deref(),
            PatternKind::Signature => self.signature.as_deref(),
        }
    }

    /// Compile the configured patterns
    ///
    /// Invalid overrides are reported here, never during parsing.
    pub fn build(&self) -> Result<PatternSet> {
        if PatternKind::ALL.iter().all(|&kind| self.pattern(kind).is_none()) {
            return Ok(self.variant.patterns().clone());
        }

        let source = |kind: PatternKind| {
            self.pattern(kind)
                .unwrap_or_else(|| self.variant.source(kind))
        };

        PatternSet::new(
            source(PatternKind::MultiQuoteHeader),
            source(PatternKind::QuotedLine),
            source(PatternKind::Signature),
        )
    }
}

impl From<Variant> for PatternConfig {
    fn from(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}
