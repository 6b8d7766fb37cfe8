use crate::error::ConvertError;
use crate::syntax::CommentSyntax;

/// The leading comment block of a file.
///
/// When the block does not open the file, `start` points at the newline in
/// front of the start token and `text` includes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock<'a> {
    /// Byte offset where the block starts
    pub start: usize,

    /// The block itself, end marker included
    pub text: &'a str,

    /// The end marker that closed the block
    pub end_token: &'static str,
}

impl HeaderBlock<'_> {
    pub fn at_file_start(&self) -> bool {
        self.start == 0
    }

    /// Already converted headers are left untouched.
    pub fn is_normalized(&self) -> bool {
        self.text.contains("SPDX")
    }
}

/// Locate the leading header block of `content` for the given syntax.
pub fn locate(content: &str, syntax: CommentSyntax) -> Result<HeaderBlock<'_>, ConvertError> {
    let start_token = syntax.start_token();

    let start = if content.starts_with(start_token) {
        0
    } else {
        content
            .find(&format!("\n{}", start_token))
            .ok_or(ConvertError::NoHeaderFound)?
    };

    let (end_pos, end_token) = syntax
        .end_tokens()
        .iter()
        .find_map(|token| content[start..].find(token).map(|pos| (start + pos, *token)))
        .ok_or(ConvertError::NoHeaderEndFound)?;

    let end = end_pos + end_token.len();

    Ok(HeaderBlock {
        start,
        text: &content[start..end],
        end_token,
    })
}
