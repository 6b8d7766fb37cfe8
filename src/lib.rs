//! spdx-convert - move legacy license headers to SPDX
//!
//! Walks a source tree, rewrites free-form `@copyright`/`@license` comment
//! headers into `SPDX-FileCopyrightText` / `SPDX-License-Identifier` tags,
//! and collects every author it drops into an `AUTHORS.md` list.
//!
//! # Features
//!
//! - C-style, HTML and `//` line comment headers
//! - Ordered, auditable rules for copyright and license lines
//! - Holders on the preserve list keep their own copyright line
//! - Honors `.gitignore`, explicit ignore dirs and `.reuse/dep5` globs
//! - Dry-run mode that never touches the filesystem
//! - Stops at the first header it cannot convert with certainty
//!
//! # Example
//!
//! ```rust,no_run
//! use spdx_convert::*;
//! use std::path::Path;
//!
//! let options = ConvertOptions {
//!     default_copyright: "Acme Inc.".to_string(),
//!     preserve_spdx: vec![],
//!     dry_run: true,
//! };
//!
//! let root = convert::resolve_root(Path::new("."), &options).unwrap();
//! let converter = convert::Converter::new(&root, &Config::default(), options).unwrap();
//! let report = converter.run(|file| println!("{:?}", file.outcome)).unwrap();
//! println!("{}", report.authors_markdown);
//! ```

pub mod attribution;
pub mod authors;
pub mod classifier;
pub mod cli;
pub mod collector;
pub mod config;
pub mod convert;
pub mod error;
pub mod header;
pub mod models;
pub mod reporter;
pub mod rewriter;
pub mod syntax;

// Re-export commonly used types
pub use error::ConvertError;
pub use models::{Config, ConvertOptions, ConvertReport, FileReport, Outcome};
pub use syntax::CommentSyntax;
