//! The n-ary parse tree returned by expression parsers.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A node in a parsed expression tree.
///
/// Child order is significant and equals source order. The tree owns its
/// children, so dropping the root reclaims the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    pub token: Token,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(token: Token) -> Self {
        ParseNode {
            token,
            children: Vec::new(),
        }
    }

    /// Renders the tree as indented `Kind "value"` lines, one node per
    /// line, two spaces per depth level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let _ = writeln!(
            out,
            "{:indent$}{:?} {:?}",
            "",
            self.token.kind,
            self.token.value,
            indent = depth * 2
        );
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}
