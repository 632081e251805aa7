//! Section model for composing generated fragments into a base contract.
//!
//! Provider output is split once into three parts:
//!
//! ```text
//! head   pragma, imports, `contract Name is ... {`
//! body   the provider's members
//! tail   the closing `}` of the contract and anything after it
//! ```
//!
//! Fragments are appended to named [`Section`]s instead of being spliced at character
//! offsets, and [`ContractLayout::render`] lays them out as
//! `head, Storage, Modifiers, body, Members, tail`, separating blocks by a blank line.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, WizardError};

/// Constructor annotation emitted by upgrade-aware base generators.
pub const UPGRADE_SAFETY_MARKER: &str = "/// @custom:oz-upgrades-unsafe-allow constructor";

/// Where a fragment is placed inside the contract body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// State variables and constants, at the start of the body.
    Storage,
    /// Modifiers, after [`Section::Storage`].
    Modifiers,
    /// Declarations and functions, at the end of the body.
    Members,
}

/// A base contract split into head/body/tail with fragment sections.
#[derive(Debug, Clone)]
pub struct ContractLayout {
    head: String,
    body: String,
    tail: String,
    storage: Vec<String>,
    modifiers: Vec<String>,
    members: Vec<String>,
}

impl ContractLayout {
    /// Split provider output around the contract body.
    ///
    /// The body starts at the first `{` after the first line that declares a contract,
    /// so braces in named imports (`import {ERC20} from ...`) are not mistaken for it.
    /// The body ends at the last `}` of the text.
    pub fn parse(source: &str) -> Result<Self> {
        let source = strip_upgrade_marker(source);

        let declaration =
            find_contract_declaration(&source).ok_or(WizardError::MissingAnchor("contract declaration"))?;
        let open = source[declaration..]
            .find('{')
            .map(|i| declaration + i)
            .ok_or(WizardError::MissingAnchor("opening brace after the contract declaration"))?;
        let close = source
            .rfind('}')
            .filter(|&i| i > open)
            .ok_or(WizardError::MissingAnchor("closing brace for the contract body"))?;

        let body = source[open + 1..close]
            .trim_start_matches(['\r', '\n'])
            .trim_end()
            .to_string();

        tracing::debug!(
            head_len = open + 1,
            body_len = body.len(),
            "parsed base contract layout"
        );

        Ok(Self {
            head: source[..=open].to_string(),
            body,
            tail: source[close..].to_string(),
            storage: Vec::new(),
            modifiers: Vec::new(),
            members: Vec::new(),
        })
    }

    /// Append a fragment to a section. Surrounding blank lines are trimmed.
    pub fn push(&mut self, section: Section, fragment: impl AsRef<str>) {
        let fragment = fragment.as_ref().trim_start_matches(['\r', '\n']).trim_end();
        if fragment.is_empty() {
            return;
        }
        let target = match section {
            Section::Storage => &mut self.storage,
            Section::Modifiers => &mut self.modifiers,
            Section::Members => &mut self.members,
        };
        target.push(fragment.to_string());
    }

    /// Fragments currently held by a section, in insertion order.
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Storage => &self.storage,
            Section::Modifiers => &self.modifiers,
            Section::Members => &self.members,
        }
    }

    /// Lay out all sections into the final contract source.
    pub fn render(&self) -> ContractSource {
        let blocks: Vec<&str> = self
            .storage
            .iter()
            .chain(&self.modifiers)
            .map(String::as_str)
            .chain((!self.body.is_empty()).then_some(self.body.as_str()))
            .chain(self.members.iter().map(String::as_str))
            .collect();

        let mut out = String::with_capacity(
            self.head.len() + self.tail.len() + blocks.iter().map(|b| b.len() + 2).sum::<usize>(),
        );
        out.push_str(&self.head);
        out.push('\n');
        if !blocks.is_empty() {
            out.push_str(&blocks.join("\n\n"));
            out.push('\n');
        }
        out.push_str(&self.tail);
        ContractSource(out)
    }
}

fn find_contract_declaration(source: &str) -> Option<usize> {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_declaration = ["contract ", "abstract contract "]
            .iter()
            .any(|kw| trimmed.starts_with(kw));
        if is_declaration {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Remove the upgrade-safety constructor annotation.
///
/// Only the annotation text goes; a line is dropped when nothing but whitespace
/// remains, so code sharing a line with the annotation is kept.
pub fn strip_upgrade_marker(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        if !line.contains(UPGRADE_SAFETY_MARKER) {
            out.push_str(line);
            continue;
        }
        let stripped = line.replace(UPGRADE_SAFETY_MARKER, "");
        if stripped.trim().is_empty() {
            continue;
        }
        out.push_str(stripped.trim_end());
        if line.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Final generated contract source. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContractSource(String);

impl ContractSource {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of non-overlapping occurrences of `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        self.0.matches(pattern).count()
    }
}

impl AsRef<str> for ContractSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContractSource> for String {
    fn from(source: ContractSource) -> Self {
        source.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "\
// SPDX-License-Identifier: MIT
pragma solidity ^0.8.20;

import {ERC20} from \"@openzeppelin/contracts/token/ERC20/ERC20.sol\";

contract Util is ERC20 {
    /// @custom:oz-upgrades-unsafe-allow constructor
    constructor() ERC20(\"Util\", \"UTL\") {}
}
";

    #[test]
    fn test_parse_skips_import_braces() {
        let layout = ContractLayout::parse(BASE).unwrap();
        assert!(layout.head.ends_with("contract Util is ERC20 {"));
        assert!(layout.head.contains("import {ERC20}"));
        assert_eq!(layout.body, "    constructor() ERC20(\"Util\", \"UTL\") {}");
        assert_eq!(layout.tail, "}\n");
    }

    #[test]
    fn test_parse_strips_upgrade_marker() {
        let source = ContractLayout::parse(BASE).unwrap().render();
        assert!(!source.as_str().contains(UPGRADE_SAFETY_MARKER));
        assert!(!source.as_str().contains("\n    \n"));
    }

    #[test]
    fn test_inline_upgrade_marker_keeps_code() {
        let source = format!(
            "contract A {{\n    constructor() {{ x = 1; }} {UPGRADE_SAFETY_MARKER}\n    uint256 x; {UPGRADE_SAFETY_MARKER} // note\n}}\n"
        );
        assert_eq!(
            strip_upgrade_marker(&source),
            "contract A {\n    constructor() { x = 1; }\n    uint256 x;  // note\n}\n"
        );
    }

    #[test]
    fn test_render_orders_sections() {
        let mut layout = ContractLayout::parse(BASE).unwrap();
        layout.push(Section::Members, "    function a() public {}\n");
        layout.push(Section::Modifiers, "\n    modifier m() { _; }");
        layout.push(Section::Storage, "    uint256 x;");
        layout.push(Section::Members, "    function b() public {}");

        let out = layout.render();
        let expected = "\
contract Util is ERC20 {
    uint256 x;

    modifier m() { _; }

    constructor() ERC20(\"Util\", \"UTL\") {}

    function a() public {}

    function b() public {}
}
";
        assert!(out.as_str().ends_with(expected), "unexpected layout:\n{out}");
    }

    #[test]
    fn test_push_ignores_empty_fragments() {
        let mut layout = ContractLayout::parse(BASE).unwrap();
        layout.push(Section::Storage, "\n\n   ");
        assert!(layout.section(Section::Storage).is_empty());
    }

    #[test]
    fn test_missing_declaration() {
        let err = ContractLayout::parse("pragma solidity ^0.8.20;\n").unwrap_err();
        assert!(matches!(err, WizardError::MissingAnchor("contract declaration")));
    }

    #[test]
    fn test_missing_braces() {
        let err = ContractLayout::parse("contract A is ERC20\n").unwrap_err();
        assert!(matches!(err, WizardError::MissingAnchor(_)));

        let err = ContractLayout::parse("contract A is ERC20 {\n").unwrap_err();
        assert!(matches!(
            err,
            WizardError::MissingAnchor("closing brace for the contract body")
        ));
    }

    #[test]
    fn test_render_without_fragments_is_stable() {
        let once = ContractLayout::parse(BASE).unwrap().render();
        let twice = ContractLayout::parse(once.as_str()).unwrap().render();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_count() {
        let source = ContractLayout::parse(BASE).unwrap().render();
        assert_eq!(source.count("contract "), 1);
    }
}
