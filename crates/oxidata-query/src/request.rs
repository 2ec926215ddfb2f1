//! The parsed request model handed to data providers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use oxidata_core::Semantic;

use crate::count::CountQuery;
use crate::expand::ExpandQuery;
use crate::filter::FilterQuery;
use crate::inlinecount::InlineCountQuery;
use crate::orderby::OrderByQuery;
use crate::search::SearchQuery;
use crate::select::SelectQuery;
use crate::topskip::{SkipQuery, TopQuery};

/// The raw `$apply` clause. Providers interpret it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyQuery(pub String);

/// Every system query option of one request, parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub filter: Option<FilterQuery>,
    pub at: Option<FilterQuery>,
    pub apply: Option<ApplyQuery>,
    pub expand: Option<ExpandQuery>,
    pub select: Option<SelectQuery>,
    pub order_by: Option<OrderByQuery>,
    pub top: Option<TopQuery>,
    pub skip: Option<SkipQuery>,
    pub count: Option<CountQuery>,
    pub inline_count: Option<InlineCountQuery>,
    pub search: Option<SearchQuery>,
}

/// The kind of resource a request addresses. Filled in by the semantic
/// phase that resolves the path against a service's metadata; parsing
/// yields [`RequestKind::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    #[default]
    Unknown,
    Metadata,
    Service,
    Entity,
    Collection,
    Singleton,
    Property,
    PropertyValue,
    Ref,
    Count,
}

/// Key/value identifiers attached to a path segment, e.g. the `1` in
/// `Employees(1)` or the pairs in `Products(ID=5,Name='x')`. Bare keys
/// map to an empty value. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier(pub IndexMap<String, String>);

impl Identifier {
    /// Whether more than one key/value pair is present.
    pub fn has_multiple(&self) -> bool {
        self.0.len() > 1
    }

    /// The first key. This is how single-value identifiers such as
    /// `Employee(1)` are read.
    pub fn first(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    /// The value for a specific key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// One slash-separated segment of the resource path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The raw segment text.
    pub raw_value: String,
    /// The name of the entity, type, collection, etc.
    pub name: String,
    /// Identifiers passed to this segment, if any.
    pub identifier: Option<Identifier>,
    /// Reserved for the semantic binding phase.
    pub semantic: Semantic,
}

/// A fully parsed request: path segments plus query options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub segments: Vec<Segment>,
    pub query: Query,
    pub kind: RequestKind,
}
