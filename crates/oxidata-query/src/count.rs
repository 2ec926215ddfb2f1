//! The `$count` query option.

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, Result};

/// A parsed `$count` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountQuery(pub bool);

/// Parses `$count`. Per the OData ABNF only `true` and `false` are
/// accepted.
pub fn parse_count(count: &str) -> Result<CountQuery> {
    match count {
        "true" => Ok(CountQuery(true)),
        "false" => Ok(CountQuery(false)),
        _ => Err(Error::bad_request(format!("invalid $count value '{count}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_booleans() {
        assert_eq!(parse_count("true").unwrap(), CountQuery(true));
        assert_eq!(parse_count("false").unwrap(), CountQuery(false));
    }

    #[test]
    fn rejects_go_style_booleans() {
        assert!(parse_count("1").is_err());
        assert!(parse_count("TRUE").is_err());
    }
}
