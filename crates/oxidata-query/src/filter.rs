//! The `$filter` query option: tokenizer configuration, grammar tables,
//! and the parsing facade.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use oxidata_core::{Error, ParseNode, Result, TokenKind};

use crate::expr::{Assoc, ExprParser};
use crate::tokenizer::Tokenizer;

static FILTER_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(filter_tokenizer);
static FILTER_PARSER: LazyLock<ExprParser> = LazyLock::new(filter_parser);

/// A parsed `$filter` expression: the parse tree plus the raw input,
/// preserved verbatim for providers that pass it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub tree: ParseNode,
    pub raw_value: String,
}

/// Parses a `$filter` expression into a tree that providers can walk to
/// produce a response.
pub fn parse_filter(filter: &str) -> Result<FilterQuery> {
    let tokens = FILTER_TOKENIZER.tokenize(filter)?;
    let postfix = FILTER_PARSER.infix_to_postfix(tokens)?;
    let tree = FILTER_PARSER.postfix_to_tree(postfix)?;
    if tree.children.is_empty() && tree.token.kind != TokenKind::Boolean {
        return Err(Error::bad_request("value must be a boolean expression"));
    }
    Ok(FilterQuery {
        tree,
        raw_value: filter.to_string(),
    })
}

/// Matches a duration literal with an optional `duration` prefix. The
/// token value is the ISO-8601 body inside the quotes: for
/// `duration'PT2H'` the value is `PT2H`.
///
/// duration      = [ "duration" ] SQUOTE durationValue SQUOTE
/// durationValue = [ SIGN ] "P" [ 1*DIGIT "D" ] [ "T" [ 1*DIGIT "H" ]
///                 [ 1*DIGIT "M" ] [ 1*DIGIT [ "." 1*DIGIT ] "S" ] ]
const DURATION_PATTERN: &str = r"^(duration)?'(?P<subtoken>-?P((([0-9]+Y([0-9]+M)?([0-9]+D)?|([0-9]+M)([0-9]+D)?|([0-9]+D))(T(([0-9]+H)([0-9]+M)?([0-9]+(\.[0-9]+)?S)?|([0-9]+M)([0-9]+(\.[0-9]+)?S)?|([0-9]+(\.[0-9]+)?S)))?)|(T(([0-9]+H)([0-9]+M)?([0-9]+(\.[0-9]+)?S)?|([0-9]+M)([0-9]+(\.[0-9]+)?S)?|([0-9]+(\.[0-9]+)?S)))))'";

/// Builds a tokenizer for `$filter` statements.
///
/// Operator and function names are case-insensitive (OData 4.01 services
/// MUST support this), so those matchers carry `(?i)` and their values
/// fold to lowercase. Per the OData ABNF, function names are followed by
/// an open parenthesis and operator names by whitespace; in practice
/// clients also write `not(City eq 'Seattle')`, so the boundary classes
/// leniently accept either.
pub fn filter_tokenizer() -> Tokenizer {
    let mut t = Tokenizer::new();
    // guidValue = 8HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 4HEXDIG "-" 12HEXDIG
    t.add(
        r"^[[:xdigit:]]{8}-[[:xdigit:]]{4}-[[:xdigit:]]{4}-[[:xdigit:]]{4}-[[:xdigit:]]{12}",
        TokenKind::Guid,
    );
    t.add(DURATION_PATTERN, TokenKind::Duration);
    t.add(
        r"^[0-9]{4,4}-[0-9]{2,2}-[0-9]{2,2}T[0-9]{2,2}:[0-9]{2,2}(:[0-9]{2,2}(.[0-9]+)?)?(Z|[+-][0-9]{2,2}:[0-9]{2,2})",
        TokenKind::DateTime,
    );
    t.add(r"^-?[0-9]{4,4}-[0-9]{2,2}-[0-9]{2,2}", TokenKind::Date);
    t.add(r"^[0-9]{2,2}:[0-9]{2,2}(:[0-9]{2,2}(.[0-9]+)?)?", TokenKind::Time);
    t.add(r"^\(", TokenKind::OpenParen);
    t.add(r"^\)", TokenKind::CloseParen);
    // '/' between a collection expression and a lambda function.
    t.add(r"^(?P<token>/)(?i)(any|all)", TokenKind::Op);
    // '/' for property navigation.
    t.add(r"^/", TokenKind::Nav);
    // The lambda predicate separator collapses into the regular function
    // argument separator so the expression parser sees the lambda
    // variable as the first argument and the predicate as the second.
    t.add_with_substitution(r"^:", TokenKind::Colon, |_| ",".to_string());
    t.add(r"^,", TokenKind::Comma);
    t.add(
        r"(?i)^(?P<token>(geo.distance|geo.intersects|geo.length))[\s(]",
        TokenKind::Func,
    );
    t.add(
        r"(?i)^(?P<token>(substringof|substring|length|indexof|exists))[\s(]",
        TokenKind::Func,
    );
    t.add(
        r"(?i)^(?P<token>(eq|ne|gt|ge|lt|le|and|or|not|has|in))[\s(]",
        TokenKind::Logical,
    );
    t.add(r"(?i)^(?P<token>(add|sub|mul|divby|div|mod))\s", TokenKind::Op);
    t.add(
        r"(?i)^(?P<token>(contains|endswith|startswith|tolower|toupper|trim|concat|year|month|day|hour|minute|second|fractionalseconds|date|time|totaloffsetminutes|now|maxdatetime|mindatetime|totalseconds|round|floor|ceiling|isof|cast))[\s(]",
        TokenKind::Func,
    );
    // anyExpr = "any" OPEN BWS [ lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr ] BWS CLOSE
    // allExpr = "all" OPEN BWS   lambdaVariableExpr BWS COLON BWS lambdaPredicateExpr   BWS CLOSE
    t.add(r"(?i)^(?P<token>(any|all))[\s(]", TokenKind::Lambda);
    t.add(r"^null", TokenKind::Null);
    t.add(r"^\$it", TokenKind::It);
    t.add(r"^\$root", TokenKind::Root);
    t.add(r"^-?[0-9]+\.[0-9]+", TokenKind::Float);
    t.add(r"^-?[0-9]+", TokenKind::Integer);
    t.add(r"^'(''|[^'])*'", TokenKind::String);
    t.add(r"^(true|false)", TokenKind::Boolean);
    // The optional '@' marks a parameter alias.
    t.add(r"^@*[a-zA-Z][a-zA-Z0-9_.]*", TokenKind::Literal);
    t.ignore(r"^ ", TokenKind::Whitespace);
    t
}

/// Builds the `$filter` grammar tables.
pub fn filter_parser() -> ExprParser {
    let mut parser = ExprParser::new();
    // '/' is both the property navigator and the link between a
    // collection expression and a lambda function.
    parser.define_operator("/", 2, Assoc::Left, 8);
    parser.define_operator("has", 2, Assoc::Left, 8);
    // 'in' takes a literal list; City in ('Seattle') must read as a
    // one-element list, not a parenthesised literal.
    parser
        .define_operator("in", 2, Assoc::Left, 8)
        .set_prefer_list_expr(true);
    parser.define_operator("-", 1, Assoc::None, 7);
    parser.define_operator("not", 1, Assoc::Left, 7);
    parser.define_operator("cast", 2, Assoc::None, 7);
    parser.define_operator("mul", 2, Assoc::None, 6);
    parser.define_operator("div", 2, Assoc::None, 6);
    parser.define_operator("divby", 2, Assoc::None, 6);
    parser.define_operator("mod", 2, Assoc::None, 6);
    parser.define_operator("add", 2, Assoc::None, 5);
    parser.define_operator("sub", 2, Assoc::None, 5);
    parser.define_operator("gt", 2, Assoc::Left, 4);
    parser.define_operator("ge", 2, Assoc::Left, 4);
    parser.define_operator("lt", 2, Assoc::Left, 4);
    parser.define_operator("le", 2, Assoc::Left, 4);
    parser.define_operator("eq", 2, Assoc::Left, 3);
    parser.define_operator("ne", 2, Assoc::Left, 3);
    parser.define_operator("and", 2, Assoc::Left, 2);
    parser.define_operator("or", 2, Assoc::Left, 1);

    parser.define_function("contains", &[2]);
    parser.define_function("endswith", &[2]);
    parser.define_function("startswith", &[2]);
    parser.define_function("exists", &[2]);
    parser.define_function("length", &[1]);
    parser.define_function("indexof", &[2]);
    parser.define_function("substring", &[2, 3]);
    parser.define_function("substringof", &[2]);
    parser.define_function("tolower", &[1]);
    parser.define_function("toupper", &[1]);
    parser.define_function("trim", &[1]);
    parser.define_function("concat", &[2]);
    parser.define_function("year", &[1]);
    parser.define_function("month", &[1]);
    parser.define_function("day", &[1]);
    parser.define_function("hour", &[1]);
    parser.define_function("minute", &[1]);
    parser.define_function("second", &[1]);
    parser.define_function("fractionalseconds", &[1]);
    parser.define_function("date", &[1]);
    parser.define_function("time", &[1]);
    parser.define_function("totaloffsetminutes", &[1]);
    parser.define_function("now", &[0]);
    parser.define_function("maxdatetime", &[0]);
    parser.define_function("mindatetime", &[0]);
    parser.define_function("totalseconds", &[1]);
    parser.define_function("round", &[1]);
    parser.define_function("floor", &[1]);
    parser.define_function("ceiling", &[1]);
    parser.define_function("isof", &[1, 2]);
    parser.define_function("cast", &[2]);
    parser.define_function("geo.distance", &[2]);
    parser.define_function("geo.intersects", &[2]);
    parser.define_function("geo.length", &[1]);
    // 'any' with zero arguments tests the collection for emptiness.
    parser.define_function("any", &[0, 2]);
    parser.define_function("all", &[2]);

    parser
}
