use oxidata_core::TokenKind;

use crate::search::{parse_search, search_tokenizer};

#[test]
fn tokenizes_terms_phrases_and_operators() {
    let tokens: Vec<_> = search_tokenizer()
        .tokenize(r#"mountain OR ("red bikes" AND avocados)"#)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Literal, "mountain".to_string()),
            (TokenKind::Op, "OR".to_string()),
            (TokenKind::OpenParen, "(".to_string()),
            (TokenKind::Literal, "\"red bikes\"".to_string()),
            (TokenKind::Op, "AND".to_string()),
            (TokenKind::Literal, "avocados".to_string()),
            (TokenKind::CloseParen, ")".to_string()),
        ]
    );
}

#[test]
fn parses_grouped_search_expressions() {
    let search = parse_search(r#"mountain OR ("red bikes" AND avocados)"#).unwrap();
    insta::assert_snapshot!(search.tree.dump(), @r#"
    Op "OR"
      Literal "mountain"
      Op "AND"
        Literal "\"red bikes\""
        Literal "avocados"
    "#);
    assert_eq!(search.raw_value, r#"mountain OR ("red bikes" AND avocados)"#);
}

#[test]
fn a_single_term_is_a_valid_search() {
    let search = parse_search("mountain").unwrap();
    assert_eq!(search.tree.token.value, "mountain");
    assert!(search.tree.children.is_empty());
}

#[test]
fn not_negates_a_term() {
    let search = parse_search("NOT mountain").unwrap();
    assert_eq!(search.tree.token.value, "NOT");
    assert_eq!(search.tree.children.len(), 1);
    assert_eq!(search.tree.children[0].token.value, "mountain");
}

#[test]
fn operators_are_case_sensitive() {
    // Lowercase "or" is just a term, so two adjacent terms result.
    let err = parse_search("mountain or bikes").unwrap_err();
    assert_eq!(
        err.to_string(),
        "two consecutive literal values 'mountain' and 'or'"
    );
}

#[test]
fn empty_search_is_rejected() {
    assert_eq!(parse_search("").unwrap_err().to_string(), "empty query parameter");
}
