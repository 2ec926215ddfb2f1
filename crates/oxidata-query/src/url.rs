//! Parsing of whole request URLs: the query-parameter dispatch and the
//! resource-path segmentation.
//!
//! Callers are expected to have URL-decoded the query string and split it
//! into key/value pairs already; this module never touches percent
//! encoding.

use indexmap::IndexMap;

use oxidata_core::{Error, Result, Semantic};

use crate::count::parse_count;
use crate::expand::parse_expand;
use crate::filter::parse_filter;
use crate::inlinecount::parse_inline_count;
use crate::orderby::parse_orderby;
use crate::request::{ApplyQuery, Identifier, Query, Request, RequestKind, Segment};
use crate::search::parse_search;
use crate::select::parse_select;
use crate::topskip::{parse_skip, parse_top};

const SUPPORTED_KEYWORDS: &[&str] = &[
    "$filter",
    "$apply",
    "$expand",
    "$select",
    "$orderby",
    "$top",
    "$skip",
    "$count",
    "$inlinecount",
    "$search",
    "$format",
    "at",
];

/// Parses the query parameters of a request into a [`Query`].
///
/// In strict mode (`lenient == false`), parameters outside the OData
/// vocabulary and parameters given more than once are rejected. Empty
/// parameter values are treated as absent, matching the original
/// behavior of query maps.
pub fn parse_query(params: &[(&str, &str)], lenient: bool) -> Result<Query> {
    if !lenient {
        for (index, (key, _)) in params.iter().enumerate() {
            if !SUPPORTED_KEYWORDS.contains(key) {
                return Err(Error::bad_request(format!(
                    "query parameter '{key}' is not supported"
                )));
            }
            if params[..index].iter().any(|(earlier, _)| earlier == key) {
                return Err(Error::bad_request(format!(
                    "query parameter '{key}' cannot be specified more than once"
                )));
            }
        }
    }

    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
            .filter(|value| !value.is_empty())
    };

    let mut query = Query::default();
    if let Some(raw) = get("$filter") {
        query.filter = Some(parse_filter(raw)?);
    }
    if let Some(raw) = get("at") {
        query.at = Some(parse_filter(raw)?);
    }
    if let Some(raw) = get("$apply") {
        query.apply = Some(ApplyQuery(raw.to_string()));
    }
    if let Some(raw) = get("$expand") {
        query.expand = Some(parse_expand(raw)?);
    }
    if let Some(raw) = get("$select") {
        query.select = Some(parse_select(raw)?);
    }
    if let Some(raw) = get("$orderby") {
        query.order_by = Some(parse_orderby(raw)?);
    }
    if let Some(raw) = get("$top") {
        query.top = Some(parse_top(raw)?);
    }
    if let Some(raw) = get("$skip") {
        query.skip = Some(parse_skip(raw)?);
    }
    if let Some(raw) = get("$count") {
        query.count = Some(parse_count(raw)?);
    }
    if let Some(raw) = get("$inlinecount") {
        query.inline_count = Some(parse_inline_count(raw)?);
    }
    if let Some(raw) = get("$search") {
        query.search = Some(parse_search(raw)?);
    }
    if get("$format").is_some() {
        return Err(Error::not_implemented("$format is not supported"));
    }

    Ok(query)
}

/// Splits a resource path into its segments. Leading and trailing
/// slashes are ignored; an empty path yields no segments.
pub fn parse_path(path: &str) -> Result<Vec<Segment>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(trimmed.split('/').map(to_segment).collect())
}

/// Parses a request path and query into the provider-facing model. The
/// request kind is resolved later by the semantic phase.
pub fn parse_request(path: &str, params: &[(&str, &str)], lenient: bool) -> Result<Request> {
    let segments = parse_path(path)?;
    let query = parse_query(params, lenient)?;
    Ok(Request {
        segments,
        query,
        kind: RequestKind::Unknown,
    })
}

fn to_segment(raw: &str) -> Segment {
    Segment {
        raw_value: raw.to_string(),
        name: parse_name(raw).to_string(),
        identifier: parse_identifiers(raw),
        semantic: Semantic::Unbound,
    }
}

/// The segment name is everything before the last parenthesised group.
fn parse_name(segment: &str) -> &str {
    match segment.rfind('(') {
        Some(open) => &segment[..open],
        None => segment,
    }
}

/// Parses the last parenthesised group of a segment into an ordered
/// key/value map. Bare values become keys with an empty value.
fn parse_identifiers(segment: &str) -> Option<Identifier> {
    let open = segment.rfind('(')?;
    let close = segment.rfind(')')?;
    if close < open {
        return None;
    }
    let raw = &segment[open + 1..close];

    let mut pairs = IndexMap::new();
    for part in raw.split(',') {
        match part.split_once('=') {
            Some((key, value)) => pairs.insert(key.to_string(), value.to_string()),
            None => pairs.insert(part.to_string(), String::new()),
        };
    }
    Some(Identifier(pairs))
}
