// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Reply Parser
//!
//! Splits a plain-text email body into fragments (the new reply, quoted
//! history, signatures and disclaimers) and extracts the visible reply.
//!
//! # Features
//!
//! - `>` quoting and `On ... wrote:` preambles, including wrapped ones
//! - Plain-text `From:`/`Sent:`/`To:`/`Subject:` blocks from mail gateways
//! - Signature and disclaimer detection
//! - Pattern sets as data: pick a [`Variant`] or supply your own regexes
//!
//! Input is an already decoded body; MIME and HTML are not handled.
//!
//! # Example
//!
//! ```rust
//! use email_reply_parser::{Variant, parse_reply};
//!
//! let body = "Sounds good, see you then.\n\n\
//!             On Tue, Mar 5, 2013 at 9:00 AM, Alice <alice@example.com> wrote:\n\
//!             > Lunch tomorrow?\n";
//!
//! let reply = parse_reply(body, Variant::Standard.patterns());
//! assert_eq!(reply, "Sounds good, see you then.\n\n");
//! ```

mod config;
mod error;
mod parser;
mod patterns;
mod types;

pub use config::PatternConfig;
pub use error::{ParseError, Result};
pub use parser::{parse, parse_reply};
pub use patterns::{PatternKind, PatternSet, Variant};
pub use types::{Fragment, Message};
