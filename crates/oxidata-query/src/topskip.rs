//! The `$top` and `$skip` query options.

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, Result};

/// A parsed `$top` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopQuery(pub i64);

/// A parsed `$skip` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipQuery(pub i64);

pub fn parse_top(top: &str) -> Result<TopQuery> {
    top.parse()
        .map(TopQuery)
        .map_err(|_| Error::bad_request(format!("invalid $top value '{top}'")))
}

pub fn parse_skip(skip: &str) -> Result<SkipQuery> {
    skip.parse()
        .map(SkipQuery)
        .map_err(|_| Error::bad_request(format!("invalid $skip value '{skip}'")))
}
