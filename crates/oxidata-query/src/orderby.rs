//! The `$orderby` query option.

use std::fmt;

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, Result, Token, TokenKind};

/// Sort direction of one `$orderby` item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// One `field [asc|desc]` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub field: Token,
    pub order: SortOrder,
}

/// A parsed `$orderby` clause plus the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByQuery {
    pub items: Vec<OrderByItem>,
    pub raw_value: String,
}

/// Parses a comma-separated `$orderby` clause. The direction is
/// case-insensitive and defaults to ascending.
pub fn parse_orderby(orderby: &str) -> Result<OrderByQuery> {
    let mut items = Vec::new();
    for item in orderby.split(',') {
        let mut parts = item.trim().split(' ');
        let field = parts.next().unwrap_or_default();
        if field.is_empty() {
            return Err(Error::bad_request("could not parse $orderby query"));
        }
        let order = match parts.next() {
            None => SortOrder::Asc,
            Some(order) if order.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            Some(_) => return Err(Error::bad_request("could not parse $orderby query")),
        };
        items.push(OrderByItem {
            field: Token::new(field, TokenKind::Literal),
            order,
        });
    }
    Ok(OrderByQuery {
        items,
        raw_value: orderby.to_string(),
    })
}
