//! Copyright and license extraction from legacy header comments.
//!
//! Each header line is run through an ordered rule table. The first rule
//! that matches decides what the line means; lines that match nothing but
//! still mention a license or a copyright are rejected so a file is never
//! relicensed on a guess.

use crate::error::ConvertError;
use crate::models::ConvertOptions;
use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Literal license declarations and the SPDX identifier each one maps to.
/// Order matters: `@license AGPL-3.0` is a prefix of the `-or-later` form.
pub const LICENSE_DECLARATIONS: [(&str, &str); 6] = [
    ("@license AGPL-3.0-or-later", "AGPL-3.0-or-later"),
    ("@license GNU AGPL version 3 or any later version", "AGPL-3.0-or-later"),
    ("@license AGPL-3.0", "AGPL-3.0-only"),
    ("@license GNU GPL version 3 or any later version", "GPL-3.0-or-later"),
    (
        "This file is licensed under the Affero General Public License version 3 or",
        "AGPL-3.0-or-later",
    ),
    ("// GNU GPL version 3 or any later version", "GPL-3.0-or-later"),
];

/// GNU license notice sentences that carry no information of their own.
pub const LICENSE_BOILERPLATE: [&str; 12] = [
    "it under the terms of the GNU General Public License as published by",
    "it under the terms of the GNU Affero General Public License as",
    "it under the terms of the GNU Afferoq General Public License as",
    "it under the terms of the GNU Affero General Public License, version 3,",
    "License, or (at your option) any later version.",
    "GNU General Public License for more details.",
    "GNU Affero General Public License for more details.",
    "You should have received a copy of the GNU General Public License",
    "You should have received a copy of the GNU Affero General Public License",
    "the Free Software Foundation, either version 3 of the License, or",
    "along with this program.  If not, see <http://www.gnu.org/licenses/>",
    "along with this program. If not, see <http://www.gnu.org/licenses/>",
];

/// How a copyright rule captures the holder's contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactStyle {
    /// `NAME <CONTACT>`
    Angle,
    /// `NAME (CONTACT)`, rewritten to angle brackets
    Paren,
    /// Free text up to the end of the line
    None,
}

#[derive(Debug)]
enum LineRule {
    Copyright { pattern: Regex, contact: ContactStyle },
    YearOnly(Regex),
    Author(Regex),
    License { needle: &'static str, identifier: &'static str },
    Boilerplate(&'static str),
}

/// What a single header line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Copyright(CopyrightStatement),
    YearOnly,
    Author(String),
    License(&'static str),
    Boilerplate,
    Unrelated,
}

/// One `(year, holder, contact)` statement from a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightStatement {
    pub year: u16,
    pub holder: String,
    pub contact: Option<String>,
}

impl CopyrightStatement {
    /// The author list entry: `NAME <CONTACT>` or the free-form text
    pub fn author(&self) -> String {
        match &self.contact {
            Some(contact) => format!("{} <{}>", self.holder, contact),
            None => self.holder.clone(),
        }
    }

    pub fn spdx_line(&self) -> String {
        format!("SPDX-FileCopyrightText: {} {}", self.year, self.author())
    }
}

/// Everything extracted from one header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    /// Author list entries, in header order
    pub authors: Vec<String>,

    /// Oldest year among statements that were not preserved
    pub min_year: Option<u16>,

    /// Verbatim SPDX lines for preserved holders
    pub preserved: Vec<String>,

    /// SPDX license identifier
    pub license: &'static str,
}

impl Attribution {
    /// Build the normalized SPDX tag lines for this header.
    pub fn normalized(&self, default_copyright: &str) -> NormalizedHeader {
        let mut copyright_lines = Vec::with_capacity(self.preserved.len() + 1);
        if let Some(year) = self.min_year {
            copyright_lines.push(format!(
                "SPDX-FileCopyrightText: {} {}",
                year, default_copyright
            ));
        }
        copyright_lines.extend(self.preserved.iter().cloned());

        let mut lines: Vec<String> = Vec::with_capacity(copyright_lines.len() + 1);
        for line in copyright_lines {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines.push(format!("SPDX-License-Identifier: {}", self.license));

        NormalizedHeader { lines }
    }
}

/// Ordered SPDX tag lines, ready to be wrapped in a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHeader {
    pub lines: Vec<String>,
}

/// The compiled rule table
#[derive(Debug)]
pub struct AttributionParser {
    rules: Vec<LineRule>,
}

impl AttributionParser {
    pub fn new() -> Result<Self> {
        let copyright = |pattern: &str, contact: ContactStyle| -> Result<LineRule> {
            Ok(LineRule::Copyright {
                pattern: compile(pattern)?,
                contact,
            })
        };

        let mut rules = vec![
            // @copyright Copyright (c) 2023 John Doe <john@doe.coop>
            copyright(
                r"@copyright Copyright \(c\) ([0-9]{4}),? ([^<]+) <([^>]+)>",
                ContactStyle::Angle,
            )?,
            // @copyright 2023 John Doe <john@doe.coop>
            copyright(r"@copyright ([0-9]{4}),? ([^<]+) <([^>]+)>", ContactStyle::Angle)?,
            // @copyright Copyright (c) 2023 John Doe (john@doe.coop)
            copyright(
                r"@copyright Copyright \(c\) ([0-9]{4}),? ([^<]+) \(([^>]+)\)",
                ContactStyle::Paren,
            )?,
            // @copyright Copyright (c) 2023 Company Name, https://company.tld
            copyright(
                r"@copyright Copyright \(c\) ([0-9]{4}),? ([^\n]+)",
                ContactStyle::None,
            )?,
            // Copyright (c) 2024 John Doe <john@doe.coop>
            copyright(r"Copyright \(c\) ([0-9]{4}),? ([^<]+) <([^>]+)>", ContactStyle::Angle)?,
            LineRule::YearOnly(compile(r"@copyright ([0-9]{4})")?),
            LineRule::Author(compile(r"@author ([^\n]+)")?),
        ];

        rules.extend(
            LICENSE_DECLARATIONS
                .iter()
                .map(|&(needle, identifier)| LineRule::License { needle, identifier }),
        );
        rules.extend(LICENSE_BOILERPLATE.iter().map(|&needle| LineRule::Boilerplate(needle)));

        Ok(Self { rules })
    }

    /// Classify one header line. The first matching rule wins.
    pub fn match_line(&self, line: &str) -> Result<LineMatch, ConvertError> {
        for rule in &self.rules {
            if let Some(found) = apply_rule(rule, line) {
                return Ok(found);
            }
        }

        let lower = line.to_lowercase();
        if lower.contains("license") {
            return Err(ConvertError::UnrecognizedLicenseLine {
                line: line.to_string(),
            });
        }
        if lower.contains("copyright") {
            return Err(ConvertError::UnrecognizedCopyrightLine {
                line: line.to_string(),
            });
        }

        Ok(LineMatch::Unrelated)
    }

    /// Extract the attribution of a whole header block.
    pub fn parse(&self, header: &str, options: &ConvertOptions) -> Result<Attribution, ConvertError> {
        let mut authors = Vec::new();
        let mut min_year: Option<u16> = None;
        let mut preserved = Vec::new();
        let mut license: Option<&'static str> = None;

        for line in header.lines() {
            match self.match_line(line)? {
                LineMatch::Copyright(statement) => {
                    if options.is_preserved(&statement.holder) {
                        preserved.push(statement.spdx_line());
                    } else if min_year.is_none_or(|year| statement.year < year) {
                        min_year = Some(statement.year);
                    }
                    authors.push(statement.author());
                }
                LineMatch::Author(author) => authors.push(author),
                LineMatch::License(identifier) => {
                    if license.is_none() {
                        license = Some(identifier);
                    }
                }
                LineMatch::YearOnly | LineMatch::Boilerplate | LineMatch::Unrelated => {}
            }
        }

        let license = license.ok_or(ConvertError::NoLicenseFound)?;

        Ok(Attribution {
            authors,
            min_year,
            preserved,
            license,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Failed to compile header pattern: {}", pattern))
}

fn apply_rule(rule: &LineRule, line: &str) -> Option<LineMatch> {
    match rule {
        LineRule::Copyright { pattern, contact } => {
            let captures = pattern.captures(line)?;
            Some(LineMatch::Copyright(statement_from(&captures, *contact)?))
        }
        LineRule::YearOnly(pattern) => pattern.is_match(line).then_some(LineMatch::YearOnly),
        LineRule::Author(pattern) => {
            let captures = pattern.captures(line)?;
            Some(LineMatch::Author(captures[1].to_string()))
        }
        LineRule::License { needle, identifier } => {
            line.contains(*needle).then_some(LineMatch::License(*identifier))
        }
        LineRule::Boilerplate(needle) => line.contains(*needle).then_some(LineMatch::Boilerplate),
    }
}

fn statement_from(captures: &Captures<'_>, contact: ContactStyle) -> Option<CopyrightStatement> {
    let year = captures[1].parse().ok()?;
    let holder = captures[2].to_string();
    let contact = match contact {
        ContactStyle::Angle | ContactStyle::Paren => Some(captures.get(3)?.as_str().to_string()),
        ContactStyle::None => None,
    };

    Some(CopyrightStatement {
        year,
        holder,
        contact,
    })
}
