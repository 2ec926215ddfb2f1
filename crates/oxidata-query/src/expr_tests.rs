use oxidata_core::{Token, TokenKind, TokenQueue};

use crate::expr::{Assoc, ExprParser};

fn lit(value: &str) -> Token {
    Token::new(value, TokenKind::Literal)
}

fn op(value: &str) -> Token {
    Token::new(value, TokenKind::Logical)
}

fn func(value: &str) -> Token {
    Token::new(value, TokenKind::Func)
}

fn open() -> Token {
    Token::new("(", TokenKind::OpenParen)
}

fn close() -> Token {
    Token::new(")", TokenKind::CloseParen)
}

fn comma() -> Token {
    Token::new(",", TokenKind::Comma)
}

fn arith() -> ExprParser {
    let mut parser = ExprParser::new();
    parser.define_operator("add", 2, Assoc::Left, 1);
    parser.define_operator("mul", 2, Assoc::Left, 2);
    parser.define_operator("pow", 2, Assoc::Right, 3);
    parser.define_operator("neg", 1, Assoc::None, 4);
    parser.define_function("max", &[2]);
    parser.define_function("len", &[1]);
    parser
}

fn values(queue: &TokenQueue) -> Vec<String> {
    queue.iter().map(|t| t.value.clone()).collect()
}

#[test]
fn higher_precedence_binds_tighter() {
    let queue = arith()
        .infix_to_postfix(vec![lit("a"), op("add"), lit("b"), op("mul"), lit("c")])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "c", "mul", "add"]);
}

#[test]
fn left_associative_operators_pop_equal_precedence() {
    let queue = arith()
        .infix_to_postfix(vec![lit("a"), op("add"), lit("b"), op("add"), lit("c")])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "add", "c", "add"]);
}

#[test]
fn right_associative_operators_stack_up() {
    let queue = arith()
        .infix_to_postfix(vec![lit("a"), op("pow"), lit("b"), op("pow"), lit("c")])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "c", "pow", "pow"]);
}

#[test]
fn unary_operator_takes_one_operand() {
    let parser = arith();
    let queue = parser.infix_to_postfix(vec![op("neg"), lit("a")]).unwrap();
    assert_eq!(values(&queue), ["a", "neg"]);

    let tree = parser
        .postfix_to_tree(parser.infix_to_postfix(vec![op("neg"), lit("a")]).unwrap())
        .unwrap();
    assert_eq!(tree.token.value, "neg");
    assert_eq!(tree.children.len(), 1);
}

#[test]
fn function_arguments_get_an_arg_count_marker() {
    let parser = arith();
    let queue = parser
        .infix_to_postfix(vec![func("max"), open(), lit("a"), comma(), lit("b"), close()])
        .unwrap();
    let kinds: Vec<_> = queue.iter().map(|t| (t.kind, t.value.as_str())).collect();
    assert_eq!(
        kinds,
        [
            (TokenKind::Literal, "a"),
            (TokenKind::Literal, "b"),
            (TokenKind::ArgCount, "2"),
            (TokenKind::Func, "max"),
        ]
    );

    let tree = parser.postfix_to_tree(queue).unwrap();
    assert_eq!(tree.token.value, "max");
    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.children[0].token.value, "a");
    assert_eq!(tree.children[1].token.value, "b");
}

#[test]
fn nested_function_calls_count_as_one_argument() {
    let parser = arith();
    let queue = parser
        .infix_to_postfix(vec![
            func("len"),
            open(),
            func("max"),
            open(),
            lit("a"),
            comma(),
            lit("b"),
            close(),
            close(),
        ])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "2", "max", "1", "len"]);
}

#[test]
fn operand_expressions_count_as_one_argument() {
    // len(a mul b): the binary operator fuses two items into one slot.
    let parser = arith();
    let queue = parser
        .infix_to_postfix(vec![func("len"), open(), lit("a"), op("mul"), lit("b"), close()])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "mul", "1", "len"]);
}

#[test]
fn precedence_groups_emit_no_markers() {
    let parser = arith();
    let queue = parser
        .infix_to_postfix(vec![open(), lit("a"), op("add"), lit("b"), close()])
        .unwrap();
    assert_eq!(values(&queue), ["a", "b", "add"]);
}

#[test]
fn list_preferring_operator_after_the_group_forces_a_list() {
    let mut parser = arith();
    parser
        .define_operator("in", 2, Assoc::Left, 8)
        .set_prefer_list_expr(true);

    let queue = parser
        .infix_to_postfix(vec![open(), lit("a"), close(), op("in"), lit("b")])
        .unwrap();
    let kinds: Vec<_> = queue.iter().map(|t| (t.kind, t.value.as_str())).collect();
    assert_eq!(
        kinds,
        [
            (TokenKind::Literal, "a"),
            (TokenKind::ArgCount, "1"),
            (TokenKind::ListExpr, "list"),
            (TokenKind::Literal, "b"),
            (TokenKind::Logical, "in"),
        ]
    );
}

#[test]
fn function_must_be_followed_by_open_paren() {
    let err = arith()
        .infix_to_postfix(vec![func("max"), lit("a")])
        .unwrap_err();
    assert_eq!(err.to_string(), "function max must be followed by '('");
}

#[test]
fn function_arity_is_validated() {
    let parser = arith();
    let queue = parser
        .infix_to_postfix(vec![func("max"), open(), lit("a"), close()])
        .unwrap();
    let err = parser.postfix_to_tree(queue).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid number of arguments for function max. Got 1"
    );
}

#[test]
fn missing_operands_are_rejected() {
    let parser = arith();
    let queue = parser.infix_to_postfix(vec![lit("a"), op("add")]).unwrap();
    let err = parser.postfix_to_tree(queue).unwrap_err();
    assert_eq!(err.to_string(), "insufficient operands for operator add");
}

#[test]
fn consecutive_literals_are_rejected() {
    let err = arith()
        .infix_to_postfix(vec![lit("a"), lit("b")])
        .unwrap_err();
    assert_eq!(err.to_string(), "two consecutive literal values 'a' and 'b'");
}

#[test]
fn comma_outside_parentheses_is_a_parse_error() {
    let err = arith()
        .infix_to_postfix(vec![lit("a"), comma(), lit("b")])
        .unwrap_err();
    assert_eq!(err.to_string(), "parse error");
}

#[test]
fn mismatched_parentheses_are_rejected() {
    let parser = arith();
    let unclosed = parser
        .infix_to_postfix(vec![open(), lit("a")])
        .unwrap_err();
    assert_eq!(unclosed.to_string(), "parse error. Mismatched parenthesis.");

    let unopened = parser
        .infix_to_postfix(vec![lit("a"), close()])
        .unwrap_err();
    assert_eq!(unopened.to_string(), "parse error. Mismatched parenthesis.");
}
