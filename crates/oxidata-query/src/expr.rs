//! Shunting-Yard expression parser over declared operator and function
//! tables.
//!
//! The engine is grammar-agnostic: [`ExprParser::define_operator`] and
//! [`ExprParser::define_function`] declare a language, and
//! [`ExprParser::infix_to_postfix`] / [`ExprParser::postfix_to_tree`]
//! parse token streams of it. The `$filter` and `$search` grammars are
//! two configurations of this engine.
//!
//! # Argument-count markers
//!
//! Variadic functions (`substring`, `isof`, `any`) and the list on the
//! right-hand side of `in` need their arity discovered at parse time.
//! While a `(` is on the operator stack its frame counts the completed
//! items inside that group: every literal and every nested `(` adds one,
//! and every binary operator fuses two items into one. When the group
//! closes, the count is emitted into the postfix queue as an `ArgCount`
//! token (followed by a `ListExpr` marker if the group was a list), so
//! the tree builder can allocate the right number of children without
//! look-back.
//!
//! # List expressions vs precedence groups
//!
//! A closing parenthesis classifies the group it ends:
//!
//! - the stack top below it is a function → function argument list;
//! - more than one item → list expression;
//! - at most one item, and the stack top or the next input token is an
//!   operator that prefers lists (`in`) → list expression, so
//!   `City in ('Seattle')` is a one-element list rather than a
//!   parenthesised literal;
//! - otherwise → precedence-only grouping, which emits no markers.

use indexmap::IndexMap;
use indexmap::map::Entry;

use oxidata_core::{Error, NodeStack, ParseNode, Result, Token, TokenKind, TokenQueue, TokenStack};

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    None,
}

/// A declared operator: token text, operand count, associativity,
/// precedence rank, and whether a parenthesised group next to it should
/// be biased toward a list expression.
#[derive(Debug, Clone)]
pub struct Operator {
    token: String,
    arity: usize,
    assoc: Assoc,
    precedence: u8,
    prefer_list_expr: bool,
}

impl Operator {
    /// Biases single-element parenthesised groups adjacent to this
    /// operator toward list expressions.
    pub fn set_prefer_list_expr(&mut self, prefer: bool) -> &mut Self {
        self.prefer_list_expr = prefer;
        self
    }
}

/// A declared function: token text and the set of argument counts it
/// accepts, kept sorted descending.
#[derive(Debug, Clone)]
pub struct Function {
    token: String,
    arities: Vec<usize>,
}

/// A Shunting-Yard parser for one expression grammar.
///
/// Immutable once the grammar is declared; safe to share across
/// concurrent parses.
#[derive(Debug, Clone, Default)]
pub struct ExprParser {
    operators: IndexMap<String, Operator>,
    functions: IndexMap<String, Function>,
}

impl ExprParser {
    pub fn new() -> Self {
        ExprParser::default()
    }

    /// Declares an operator and returns it for further configuration.
    pub fn define_operator(
        &mut self,
        token: &str,
        arity: usize,
        assoc: Assoc,
        precedence: u8,
    ) -> &mut Operator {
        let operator = Operator {
            token: token.to_string(),
            arity,
            assoc,
            precedence,
            prefer_list_expr: false,
        };
        match self.operators.entry(token.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(operator);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(operator),
        }
    }

    /// Declares a function accepting any of the given argument counts.
    pub fn define_function(&mut self, token: &str, arities: &[usize]) {
        let mut arities = arities.to_vec();
        arities.sort_unstable_by(|a, b| b.cmp(a));
        self.functions.insert(
            token.to_string(),
            Function {
                token: token.to_string(),
                arities,
            },
        );
    }

    /// Converts an infix token stream to a postfix queue.
    pub fn infix_to_postfix(&self, tokens: Vec<Token>) -> Result<TokenQueue> {
        let mut queue = TokenQueue::new();
        let mut stack = TokenStack::new();
        let mut tokens = tokens.into_iter().peekable();
        // Tracks the previous literal so adjacent literals are rejected.
        let mut previous_literal: Option<String> = None;

        while let Some(token) = tokens.next() {
            if self.functions.contains_key(&token.value) {
                if !tokens.peek().is_some_and(|next| next.value == "(") {
                    return Err(Error::bad_request(format!(
                        "function {} must be followed by '('",
                        token.value
                    )));
                }
                stack.push(token);
                previous_literal = None;
            } else if token.value == "," {
                if !stack.drain_to_open_paren(&mut queue) {
                    return Err(Error::bad_request("parse error"));
                }
                previous_literal = None;
            } else if let Some(o1) = self.operators.get(&token.value) {
                while let Some(top) = stack.peek() {
                    let Some(o2) = self.operators.get(&top.value) else {
                        break;
                    };
                    let pops = match o1.assoc {
                        Assoc::Left => o1.precedence <= o2.precedence,
                        Assoc::Right => o1.precedence < o2.precedence,
                        Assoc::None => false,
                    };
                    if !pops {
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        queue.enqueue(popped);
                    }
                }
                if o1.arity == 2 {
                    stack.decrement_arg_count();
                }
                stack.push(token);
                previous_literal = None;
            } else if token.value == "(" {
                stack.increment_arg_count();
                stack.push(token);
                previous_literal = None;
            } else if token.value == ")" {
                if !stack.drain_to_open_paren(&mut queue) {
                    return Err(Error::bad_request("parse error. Mismatched parenthesis."));
                }
                let arg_count = stack.arg_count();
                stack.pop();

                let top_is_function = stack
                    .peek()
                    .is_some_and(|top| self.functions.contains_key(&top.value));
                if top_is_function {
                    queue.enqueue(Token::new(arg_count.to_string(), TokenKind::ArgCount));
                    if let Some(function) = stack.pop() {
                        queue.enqueue(function);
                    }
                } else {
                    let prefers_list = |t: &Token| {
                        self.operators
                            .get(&t.value)
                            .is_some_and(|o| o.prefer_list_expr)
                    };
                    let is_list = arg_count > 1
                        || stack.peek().is_some_and(prefers_list)
                        || tokens.peek().is_some_and(prefers_list);
                    if is_list {
                        queue.enqueue(Token::new(arg_count.to_string(), TokenKind::ArgCount));
                        queue.enqueue(Token::new("list", TokenKind::ListExpr));
                    }
                }
                previous_literal = None;
            } else {
                if let Some(previous) = previous_literal {
                    return Err(Error::bad_request(format!(
                        "two consecutive literal values '{previous}' and '{}'",
                        token.value
                    )));
                }
                previous_literal = Some(token.value.clone());
                stack.increment_arg_count();
                queue.enqueue(token);
            }
        }

        while let Some(top) = stack.pop() {
            if top.value == "(" || top.value == ")" {
                return Err(Error::bad_request("parse error. Mismatched parenthesis."));
            }
            queue.enqueue(top);
        }

        Ok(queue)
    }

    /// Folds a postfix queue into a parse tree, validating function
    /// arities against the declared sets.
    pub fn postfix_to_tree(&self, mut queue: TokenQueue) -> Result<ParseNode> {
        let mut stack = NodeStack::new();

        while let Some(token) = queue.dequeue() {
            if let Some(function) = self.functions.get(&token.value) {
                let count = pop_arg_count(&mut stack, &token.value)?;
                if !function.arities.contains(&count) {
                    return Err(Error::bad_request(format!(
                        "invalid number of arguments for function {}. Got {}",
                        function.token, count
                    )));
                }
                let node = collect_children(&mut stack, token, count)?;
                stack.push(node);
            } else if let Some(operator) = self.operators.get(&token.value) {
                if stack.len() < operator.arity {
                    return Err(Error::bad_request(format!(
                        "insufficient operands for operator {}",
                        operator.token
                    )));
                }
                let node = collect_children(&mut stack, token, operator.arity)?;
                stack.push(node);
            } else if token.kind == TokenKind::ListExpr {
                let count = pop_arg_count(&mut stack, &token.value)?;
                let node = collect_children(&mut stack, token, count)?;
                stack.push(node);
            } else {
                stack.push(ParseNode::new(token));
            }
        }

        stack
            .pop()
            .ok_or_else(|| Error::bad_request("parse error"))
    }
}

/// Pops the argument-count marker that must precede a variadic token in
/// a well-formed postfix queue.
fn pop_arg_count(stack: &mut NodeStack, name: &str) -> Result<usize> {
    let missing = || Error::bad_request(format!("missing argument count for {name}"));
    let node = stack
        .pop()
        .filter(|node| node.token.kind == TokenKind::ArgCount)
        .ok_or_else(missing)?;
    node.token.value.parse().map_err(|_| missing())
}

/// Pops `count` operands off the stack as children, restoring source
/// order.
fn collect_children(stack: &mut NodeStack, token: Token, count: usize) -> Result<ParseNode> {
    let mut children = Vec::with_capacity(count);
    for _ in 0..count {
        let child = stack.pop().ok_or_else(|| {
            Error::bad_request(format!("insufficient operands for operator {}", token.value))
        })?;
        children.push(child);
    }
    children.reverse();
    Ok(ParseNode { token, children })
}
