use crate::attribution::AttributionParser;
use crate::error::ConvertError;
use crate::header;
use crate::models::{ConvertOptions, FileReport, Outcome, SourceFile};
use crate::syntax::CommentSyntax;
use std::fs;
use std::path::Path;

/// Result of rewriting a file's content in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Header already carries SPDX tags
    AlreadyNormalized,
    /// Header replaced with its normalized form
    Changed { content: String, authors: Vec<String> },
}

/// Replace the leading header of `content` with its SPDX form.
pub fn rewrite_content(
    content: &str,
    syntax: CommentSyntax,
    parser: &AttributionParser,
    options: &ConvertOptions,
) -> Result<Rewrite, ConvertError> {
    let block = header::locate(content, syntax)?;
    if block.is_normalized() {
        return Ok(Rewrite::AlreadyNormalized);
    }

    let attribution = parser.parse(block.text, options)?;
    let normalized = attribution.normalized(&options.default_copyright);

    let mut new_header = String::new();
    if !block.at_file_start() {
        new_header.push('\n');
    }
    new_header.push_str(&syntax.wrap(&normalized.lines, block.end_token));

    Ok(Rewrite::Changed {
        content: content.replacen(block.text, &new_header, 1),
        authors: attribution.authors,
    })
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            extension,
            content,
        })
    }
}

/// Convert one file on disk. Writes only outside dry-run mode.
pub fn rewrite_file(
    path: &Path,
    syntax: CommentSyntax,
    parser: &AttributionParser,
    options: &ConvertOptions,
) -> Result<FileReport, ConvertError> {
    let source = SourceFile::read(path)?;
    log::debug!("Rewriting {} as {:?} ({})", path.display(), syntax, source.extension);

    let (outcome, authors) = match rewrite_content(&source.content, syntax, parser, options)? {
        Rewrite::AlreadyNormalized => (Outcome::AlreadySpdx, Vec::new()),
        Rewrite::Changed { content, authors } => {
            if options.dry_run {
                (Outcome::WouldReplace, authors)
            } else {
                fs::write(&source.path, content)?;
                (Outcome::Replaced, authors)
            }
        }
    };

    Ok(FileReport {
        path: source.path,
        outcome,
        authors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dry_run: bool) -> ConvertOptions {
        ConvertOptions {
            default_copyright: "Acme Inc.".to_string(),
            preserve_spdx: vec![],
            dry_run,
        }
    }

    fn rewrite(content: &str, syntax: CommentSyntax) -> Rewrite {
        let parser = AttributionParser::new().unwrap();
        rewrite_content(content, syntax, &parser, &options(false)).unwrap()
    }

    #[test]
    fn test_php_header_after_open_tag() {
        let content = "<?php\n\
/**\n\
 * @copyright Copyright (c) 2020, Jane Doe <jane@x.org>\n\
 *\n\
 * @license AGPL-3.0-or-later\n\
 */\n\
namespace App;\n";

        match rewrite(content, CommentSyntax::CBlock) {
            Rewrite::Changed { content, authors } => {
                assert_eq!(
                    content,
                    "<?php\n/**\n * SPDX-FileCopyrightText: 2020 Acme Inc.\n * SPDX-License-Identifier: AGPL-3.0-or-later\n */\nnamespace App;\n"
                );
                assert_eq!(authors, vec!["Jane Doe <jane@x.org>"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_header_at_file_start() {
        let content = "/** @copyright Copyright (c) 2020 Jane Doe <jane@x.org>\n * @license AGPL-3.0-or-later\n */\nbody { }\n";

        match rewrite(content, CommentSyntax::CBlock) {
            Rewrite::Changed { content, .. } => assert_eq!(
                content,
                "/**\n * SPDX-FileCopyrightText: 2020 Acme Inc.\n * SPDX-License-Identifier: AGPL-3.0-or-later\n */\nbody { }\n"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_vue_header() {
        let content = "<!--\n  - @copyright Copyright (c) 2019 Joe <joe@x.org>\n  - @license GNU AGPL version 3 or any later version\n-->\n<template/>\n";

        match rewrite(content, CommentSyntax::Html) {
            Rewrite::Changed { content, .. } => assert_eq!(
                content,
                "<!--\n  - SPDX-FileCopyrightText: 2019 Acme Inc.\n  - SPDX-License-Identifier: AGPL-3.0-or-later\n-->\n<template/>\n"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_swift_header_keeps_terminator() {
        let content = "//\n// Copyright (c) 2021 Ann <ann@x.org>\n//\n// GNU GPL version 3 or any later version\n//\n\nimport Foundation\n";

        match rewrite(content, CommentSyntax::LineComment) {
            Rewrite::Changed { content, authors } => {
                assert_eq!(
                    content,
                    "//\n// SPDX-FileCopyrightText: 2021 Acme Inc.\n// SPDX-License-Identifier: GPL-3.0-or-later\n//\n\nimport Foundation\n"
                );
                assert_eq!(authors, vec!["Ann <ann@x.org>"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_vue_header_after_template() {
        let content = "<template>\n  <div/>\n</template>\n<!--\n  - @copyright Copyright (c) 2019 Joe <joe@x.org>\n  - @license AGPL-3.0-or-later\n-->\n<script>\n";

        match rewrite(content, CommentSyntax::Html) {
            Rewrite::Changed { content, .. } => assert_eq!(
                content,
                "<template>\n  <div/>\n</template>\n<!--\n  - SPDX-FileCopyrightText: 2019 Acme Inc.\n  - SPDX-License-Identifier: AGPL-3.0-or-later\n-->\n<script>\n"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_swift_header_after_shebang() {
        let content = "#!/usr/bin/env swift\n//\n// Copyright (c) 2021 Ann <ann@x.org>\n// GNU GPL version 3 or any later version\n//\n\nimport Foundation\n";

        match rewrite(content, CommentSyntax::LineComment) {
            Rewrite::Changed { content, .. } => assert_eq!(
                content,
                "#!/usr/bin/env swift\n//\n// SPDX-FileCopyrightText: 2021 Acme Inc.\n// SPDX-License-Identifier: GPL-3.0-or-later\n//\n\nimport Foundation\n"
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_already_normalized_is_noop() {
        let content = "/**\n * SPDX-FileCopyrightText: 2020 Acme Inc.\n * SPDX-License-Identifier: AGPL-3.0-or-later\n */\n";
        assert_eq!(rewrite(content, CommentSyntax::CBlock), Rewrite::AlreadyNormalized);
    }

    #[test]
    fn test_rewrite_file_dry_run_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.js");
        let original = "/*\n * @copyright 2022 Bo <bo@x.org>\n * @license AGPL-3.0-or-later\n */\n";
        fs::write(&path, original).unwrap();

        let parser = AttributionParser::new().unwrap();
        let report = rewrite_file(&path, CommentSyntax::CBlock, &parser, &options(true)).unwrap();

        assert_eq!(report.outcome, Outcome::WouldReplace);
        assert_eq!(report.authors, vec!["Bo <bo@x.org>"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);

        let report = rewrite_file(&path, CommentSyntax::CBlock, &parser, &options(false)).unwrap();
        assert_eq!(report.outcome, Outcome::Replaced);
        assert!(fs::read_to_string(&path).unwrap().contains("SPDX-FileCopyrightText: 2022 Acme Inc."));

        let report = rewrite_file(&path, CommentSyntax::CBlock, &parser, &options(false)).unwrap();
        assert_eq!(report.outcome, Outcome::AlreadySpdx);
        assert!(report.authors.is_empty());
    }

    #[test]
    fn test_unrecognized_license_is_fatal() {
        let parser = AttributionParser::new().unwrap();
        let result = rewrite_content(
            "/*\n * @license MIT\n */",
            CommentSyntax::CBlock,
            &parser,
            &options(true),
        );
        assert!(matches!(result, Err(ConvertError::UnrecognizedLicenseLine { .. })));
    }
}
