//! Parsed message and fragment types

use serde::{Deserialize, Serialize};

/// A maximal run of body lines sharing the same classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Lines of this fragment, each with its `\n` terminator
    content: String,

    /// Every line matched the quoted-line pattern
    quoted: bool,

    /// The fragment opens with a signature-start line
    signature: bool,

    /// The fragment contains a collapsed original-message header block
    headers: bool,

    /// Not part of the visible reply
    hidden: bool,
}

impl Fragment {
    pub(crate) const fn new(content: String, quoted: bool, signature: bool, headers: bool) -> Self {
        Self {
            content,
            quoted,
            signature,
            headers,
            hidden: false,
        }
    }

    pub(crate) const fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Raw text of the fragment, line terminators included
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lines of the fragment without terminators
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.content.lines()
    }

    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        self.quoted
    }

    #[must_use]
    pub const fn is_signature(&self) -> bool {
        self.signature
    }

    #[must_use]
    pub const fn has_headers(&self) -> bool {
        self.headers
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether this fragment contributes to the reply
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.hidden && !self.quoted
    }

    /// Check if the fragment holds only whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// An email body split into fragments, in original top-to-bottom order
///
/// Fragments partition [`Message::text`]: concatenating every fragment's
/// content reproduces it exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Body after line-ending normalization and header collapsing
    text: String,

    fragments: Vec<Fragment>,
}

impl Message {
    pub(crate) const fn new(text: String, fragments: Vec<Fragment>) -> Self {
        Self { text, fragments }
    }

    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The normalized body the fragments were cut from
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments that make up the reply
    pub fn visible_fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(|f| f.is_visible())
    }

    /// The newly written part of the message
    ///
    /// Concatenates every fragment that is neither hidden nor quoted. A body
    /// with nothing visible yields an empty string.
    #[must_use]
    pub fn reply(&self) -> String {
        self.visible_fragments().map(Fragment::content).collect()
    }

    /// All quoted text, in original order
    #[must_use]
    pub fn quoted_text(&self) -> String {
        self.fragments
            .iter()
            .filter(|f| f.quoted)
            .map(Fragment::content)
            .collect()
    }

    /// Content of the first signature block
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.fragments
            .iter()
            .find(|f| f.signature)
            .map(Fragment::content)
    }
}
