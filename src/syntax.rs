/// Keywords that close a `//` header block, tried in this order.
///
/// The first keyword present anywhere after the header start wins, even
/// when a later one occurs earlier in the file. A keyword mentioned inside
/// the comment text itself ends the block early.
pub const LINE_COMMENT_TERMINATORS: [&str; 5] =
    ["import", "extension", "protocol", "@objcMembers", "class"];

/// Comment syntaxes a header can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `/* ... */` (php, css, scss, m, h, js/ts family)
    CBlock,
    /// `<!-- ... -->` (vue, html)
    Html,
    /// `//` lines up to a declaration keyword (swift)
    LineComment,
}

impl CommentSyntax {
    pub fn start_token(&self) -> &'static str {
        match self {
            CommentSyntax::CBlock => "/*",
            CommentSyntax::Html => "<!--",
            CommentSyntax::LineComment => "//",
        }
    }

    /// Candidate end markers in priority order
    pub fn end_tokens(&self) -> &'static [&'static str] {
        match self {
            CommentSyntax::CBlock => &["*/"],
            CommentSyntax::Html => &["-->"],
            CommentSyntax::LineComment => &LINE_COMMENT_TERMINATORS,
        }
    }

    /// Wrap normalized tag lines in this comment syntax. The `//` form ends
    /// on a code keyword, so `end_token` is emitted again after the comment.
    pub fn wrap(&self, lines: &[String], end_token: &str) -> String {
        match self {
            CommentSyntax::CBlock => format!("/**\n * {}\n */", lines.join("\n * ")),
            CommentSyntax::Html => format!("<!--\n  - {}\n-->", lines.join("\n  - ")),
            CommentSyntax::LineComment => {
                format!("//\n// {}\n//\n\n{}", lines.join("\n// "), end_token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<String> {
        vec![
            "SPDX-FileCopyrightText: 2019 Acme".to_string(),
            "SPDX-License-Identifier: AGPL-3.0-or-later".to_string(),
        ]
    }

    #[test]
    fn test_wrap_c_block() {
        assert_eq!(
            CommentSyntax::CBlock.wrap(&lines(), "*/"),
            "/**\n * SPDX-FileCopyrightText: 2019 Acme\n * SPDX-License-Identifier: AGPL-3.0-or-later\n */"
        );
    }

    #[test]
    fn test_wrap_html() {
        assert_eq!(
            CommentSyntax::Html.wrap(&lines(), "-->"),
            "<!--\n  - SPDX-FileCopyrightText: 2019 Acme\n  - SPDX-License-Identifier: AGPL-3.0-or-later\n-->"
        );
    }

    #[test]
    fn test_wrap_line_comment_reinserts_terminator() {
        assert_eq!(
            CommentSyntax::LineComment.wrap(&lines(), "import"),
            "//\n// SPDX-FileCopyrightText: 2019 Acme\n// SPDX-License-Identifier: AGPL-3.0-or-later\n//\n\nimport"
        );
    }

    #[test]
    fn test_terminator_order() {
        assert_eq!(
            CommentSyntax::LineComment.end_tokens(),
            &["import", "extension", "protocol", "@objcMembers", "class"]
        );
    }
}
