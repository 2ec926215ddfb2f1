//! The `$inlinecount` query option.

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, Result};

/// A parsed `$inlinecount` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineCountQuery {
    AllPages,
    None,
}

pub fn parse_inline_count(inlinecount: &str) -> Result<InlineCountQuery> {
    match inlinecount {
        "allpages" => Ok(InlineCountQuery::AllPages),
        "none" => Ok(InlineCountQuery::None),
        _ => Err(Error::bad_request(format!(
            "invalid $inlinecount value '{inlinecount}'"
        ))),
    }
}
