//! Fragment boundary detection
//!
//! The body is scanned from the last line to the first. Replies are
//! conventionally top-posted, so the quoted history and signatures are met
//! first and can be closed off before the reply itself is reached.
//!
//! Each line is classified once (`Line`) and fed to a small state machine:
//!
//! | state            | line                  | action                                      |
//! |------------------|-----------------------|---------------------------------------------|
//! | `Idle`           | any                   | open a fragment with the line               |
//! | `Collecting`     | same quotedness       | add the line                                |
//! | `Collecting`     | different quotedness  | close, then open with the line              |
//! | `SignatureStart` | blank, same quotedness| mark signature, add the line, close         |
//! | `SignatureStart` | blank, other          | mark signature, close, open with the line   |
//! | `SignatureStart` | non-blank             | as `Collecting`                             |
//!
//! Adding a signature-start line moves to `SignatureStart`. The fragment only
//! becomes a signature if a blank line sits directly above that line; otherwise
//! the line is ordinary text and collection carries on.

use crate::patterns::PatternSet;
use crate::types::{Fragment, Message};
use tracing::{debug, trace};

/// Prefix given to collapsed header blocks so they classify as quoted
const QUOTE_MARKER: &str = "> ";

/// Split an email body into fragments
///
/// Never fails: any input, including an empty string, yields a valid
/// [`Message`]. An empty body has no fragments.
#[must_use]
pub fn parse(text: &str, patterns: &PatternSet) -> Message {
    let Normalized { text, header_lines } = normalize(text, patterns);

    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut scanner = Scanner::default();
    for (index, &raw) in lines.iter().enumerate().rev() {
        let header = header_lines.binary_search(&index).is_ok();
        scanner.step(Line {
            raw,
            quoted: header || patterns.is_quoted(raw),
            signature: patterns.is_signature_start(raw),
            blank: raw.trim().is_empty(),
            header,
        });
    }
    let mut fragments = scanner.finish();
    fragments.reverse();
    mark_hidden(&mut fragments);

    debug!(
        "Parsed body: {} lines, {} fragments, {} hidden",
        lines.len(),
        fragments.len(),
        fragments.iter().filter(|f| f.is_hidden()).count()
    );

    Message::new(text, fragments)
}

/// Reply portion of an email body
#[must_use]
pub fn parse_reply(text: &str, patterns: &PatternSet) -> String {
    parse(text, patterns).reply()
}

/// Body text ready for line scanning
struct Normalized {
    text: String,
    /// Sorted indices of lines holding a collapsed header block
    header_lines: Vec<usize>,
}

/// Normalize line endings and fold each original-message header block
/// onto a single quoted line.
fn normalize(text: &str, patterns: &PatternSet) -> Normalized {
    let text = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(text.len());
    let mut header_lines = Vec::new();
    let mut line = 0;
    let mut last = 0;

    for m in patterns.header_matches(&text) {
        if m.as_str().is_empty() {
            continue;
        }
        let before = &text[last..m.start()];
        line += before.matches('\n').count();
        out.push_str(before);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
            line += 1;
        }

        let collapsed = collapse(m.as_str());
        trace!("Collapsed header block at line {line}: {collapsed}");
        header_lines.push(line);
        out.push_str(QUOTE_MARKER);
        out.push_str(&collapsed);
        if m.as_str().ends_with('\n') {
            out.push('\n');
            line += 1;
        }
        last = m.end();
    }
    out.push_str(&text[last..]);

    Normalized {
        text: out,
        header_lines,
    }
}

/// Join the non-blank lines of a block with single spaces
fn collapse(block: &str) -> String {
    block
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A body line and its classification
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    raw: &'a str,
    quoted: bool,
    signature: bool,
    blank: bool,
    header: bool,
}

/// Lines of the fragment being built, last line first
#[derive(Debug)]
struct Accumulator<'a> {
    lines: Vec<&'a str>,
    quoted: bool,
    signature: bool,
    headers: bool,
}

impl<'a> Accumulator<'a> {
    const fn new(quoted: bool) -> Self {
        Self {
            lines: Vec::new(),
            quoted,
            signature: false,
            headers: false,
        }
    }

    fn push(&mut self, line: Line<'a>) {
        self.lines.push(line.raw);
        self.headers |= line.header;
    }

    fn into_fragment(self) -> Fragment {
        let content: String = self.lines.iter().rev().copied().collect();
        Fragment::new(content, self.quoted, self.signature, self.headers)
    }
}

#[derive(Debug, Default)]
enum State<'a> {
    #[default]
    Idle,
    Collecting(Accumulator<'a>),
    /// The last line added may open a signature
    SignatureStart(Accumulator<'a>),
}

/// Bottom-up fragment builder
#[derive(Debug, Default)]
struct Scanner<'a> {
    state: State<'a>,
    /// Finished fragments, last fragment first
    fragments: Vec<Fragment>,
}

impl<'a> Scanner<'a> {
    fn step(&mut self, line: Line<'a>) {
        self.state = match std::mem::take(&mut self.state) {
            State::Idle => absorb(Accumulator::new(line.quoted), line),
            State::SignatureStart(mut acc) if line.blank => {
                acc.signature = true;
                if acc.quoted == line.quoted {
                    acc.push(line);
                    self.close(acc);
                    State::Idle
                } else {
                    self.close(acc);
                    absorb(Accumulator::new(line.quoted), line)
                }
            }
            State::Collecting(acc) | State::SignatureStart(acc) if acc.quoted == line.quoted => {
                absorb(acc, line)
            }
            State::Collecting(acc) | State::SignatureStart(acc) => {
                self.close(acc);
                absorb(Accumulator::new(line.quoted), line)
            }
        };
    }

    fn close(&mut self, acc: Accumulator<'a>) {
        let fragment = acc.into_fragment();
        trace!(
            "Fragment closed: quoted={} signature={} headers={} ({} bytes)",
            fragment.is_quoted(),
            fragment.is_signature(),
            fragment.has_headers(),
            fragment.content().len()
        );
        self.fragments.push(fragment);
    }

    fn finish(mut self) -> Vec<Fragment> {
        match std::mem::take(&mut self.state) {
            State::Idle => {}
            State::Collecting(acc) | State::SignatureStart(acc) => self.close(acc),
        }
        self.fragments
    }
}

fn absorb<'a>(mut acc: Accumulator<'a>, line: Line<'a>) -> State<'a> {
    acc.push(line);
    if line.signature {
        State::SignatureStart(acc)
    } else {
        State::Collecting(acc)
    }
}

/// Hide every quoted or signature fragment and everything after it
fn mark_hidden(fragments: &mut [Fragment]) {
    let mut hidden = false;
    for fragment in fragments {
        hidden = hidden || fragment.is_quoted() || fragment.is_signature();
        fragment.set_hidden(hidden);
    }
}
