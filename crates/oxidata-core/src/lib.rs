#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for OData URL query parsing.
//!
//! Everything a query parser produces or shuffles around lives here: the
//! [`Token`] model shared by all tokenizers, the n-ary [`ParseNode`] tree
//! that expression parsers return, the queue/stack types used by the
//! infix-to-postfix conversion, and the HTTP-mapped [`Error`] type.
//!
//! The parsers themselves live in `oxidata-query`; this crate has no
//! parsing logic and no I/O.

pub mod error;
pub mod node;
pub mod queue;
pub mod token;


pub use error::{Error, Result};
pub use node::ParseNode;
pub use queue::{NodeStack, TokenQueue, TokenStack};
pub use token::{Semantic, Token, TokenKind};
