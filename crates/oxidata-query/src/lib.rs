#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parsers for the query-string and URL-path portions of OData v4
//! requests.
//!
//! # Architecture
//!
//! The heart of the crate is the `$filter` expression pipeline:
//!
//! ```text
//! Source text → Tokenizer → Tokens → infix_to_postfix → TokenQueue
//!                                          → postfix_to_tree → ParseNode
//! ```
//!
//! - [`tokenizer`]: a registration-ordered regex matcher engine. Matchers
//!   are tried in declaration order, first match wins; named capture
//!   groups select between consume-vs-capture modes so operator and
//!   function names can be boundary-checked without consuming the
//!   boundary.
//! - [`expr`]: a Shunting-Yard expression parser over declared operator
//!   and function tables. The postfix queue carries synthetic
//!   argument-count and list-expression markers so variadic constructs
//!   fold into the tree without look-back.
//! - [`filter`]: the canonical `$filter` grammar and the
//!   [`parse_filter`] facade.
//!
//! The remaining modules parse the other system query options
//! (`$orderby`, `$top`, `$skip`, `$count`, `$inlinecount`, `$select`,
//! `$search`, `$expand`) and assemble them from a full query string or
//! request path ([`url`]).
//!
//! Parsing is pure: the shared tokenizer and parser instances are
//! immutable statics, so calls from multiple threads proceed in parallel
//! with no coordination.
//!
//! # Example
//!
//! ```
//! use oxidata_query::parse_filter;
//!
//! let filter = parse_filter("Name eq 'Milk' and Price lt 2.55").unwrap();
//! assert_eq!(filter.tree.token.value, "and");
//! assert_eq!(filter.raw_value, "Name eq 'Milk' and Price lt 2.55");
//! ```

pub mod count;
pub mod expand;
pub mod expr;
pub mod filter;
pub mod inlinecount;
pub mod orderby;
pub mod request;
pub mod search;
pub mod select;
pub mod tokenizer;
pub mod topskip;
pub mod url;

#[cfg(test)]
mod expand_tests;
#[cfg(test)]
mod expr_tests;
#[cfg(test)]
mod orderby_tests;
#[cfg(test)]
mod search_tests;

pub use oxidata_core::{Error, ParseNode, Result, Semantic, Token, TokenKind};

pub use count::{CountQuery, parse_count};
pub use expand::{ExpandItem, ExpandQuery, parse_expand};
pub use expr::{Assoc, ExprParser, Function, Operator};
pub use filter::{FilterQuery, parse_filter};
pub use inlinecount::{InlineCountQuery, parse_inline_count};
pub use orderby::{OrderByItem, OrderByQuery, SortOrder, parse_orderby};
pub use request::{ApplyQuery, Identifier, Query, Request, RequestKind, Segment};
pub use search::{SearchQuery, parse_search};
pub use select::{SelectItem, SelectQuery, parse_select};
pub use tokenizer::Tokenizer;
pub use topskip::{SkipQuery, TopQuery, parse_skip, parse_top};
pub use url::{parse_path, parse_query, parse_request};
