// ABOUTME: Parser building expressions from the lexer's token stream

use crate::error::EvalError;
use crate::lexer::{tokenize, Spanned, Token};
use crate::value::Value;

struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|s| s.position)
            .unwrap_or_else(|| self.tokens.last().map(|s| s.position).unwrap_or(0))
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos).map(|s| &s.token);
        self.pos += 1;
        tok
    }
}

fn parse_err(message: impl Into<String>, position: usize) -> EvalError {
    EvalError::Parse {
        message: message.into(),
        position,
    }
}

/// Parse the next complete expression off the cursor, consuming it.
fn parse_expr(cur: &mut Cursor) -> Result<Value, EvalError> {
    let position = cur.position();
    match cur.advance() {
        None => Err(parse_err("unexpected end of input", position)),
        Some(Token::Lp) => parse_list_tail(cur),
        Some(Token::Rp) => Err(parse_err("unexpected ')'", position)),
        Some(Token::Dot) => Err(parse_err("unexpected '.'", position)),
        Some(Token::Num(n)) => Ok(Value::Number(n.clone())),
        Some(Token::Atom(name)) => Ok(Value::atom(name.clone())),
        Some(Token::Quote) => Ok(Value::list(vec![Value::atom("quote"), parse_expr(cur)?])),
        Some(Token::SyntaxQuote) => Ok(Value::list(vec![
            Value::atom("syntax-quote"),
            parse_expr(cur)?,
        ])),
        Some(Token::Unquote) => Ok(Value::list(vec![Value::atom("unquote"), parse_expr(cur)?])),
        Some(Token::SpliceUnquote) => Ok(Value::list(vec![
            Value::atom("splicing-unquote"),
            parse_expr(cur)?,
        ])),
    }
}

/// Parse the body of a list after its opening `(` has been consumed.
fn parse_list_tail(cur: &mut Cursor) -> Result<Value, EvalError> {
    let mut items = Vec::new();
    loop {
        match cur.peek() {
            None => return Err(parse_err("unterminated list", cur.position())),
            Some(Token::Rp) => {
                cur.advance();
                return Ok(Value::list(items));
            }
            Some(Token::Dot) => {
                cur.advance();
                let tail = parse_expr(cur)?;
                match cur.advance() {
                    Some(Token::Rp) => {
                        let mut result = tail;
                        for item in items.into_iter().rev() {
                            result = Value::cons(item, result);
                        }
                        return Ok(result);
                    }
                    _ => return Err(parse_err("expected ')' after dotted tail", cur.position())),
                }
            }
            _ => items.push(parse_expr(cur)?),
        }
    }
}

/// Parse a full input into a sequence of top-level expressions.
pub fn parse(input: &str) -> Result<Vec<Value>, EvalError> {
    let tokens = tokenize(input).map_err(|(message, position)| parse_err(message, position))?;
    let mut cur = Cursor {
        tokens: &tokens,
        pos: 0,
    };
    let mut exprs = Vec::new();
    while cur.peek().is_some() {
        exprs.push(parse_expr(&mut cur)?);
    }
    Ok(exprs)
}

/// Parse a single expression, erroring if the input contains more than one
/// top-level form (or none).
pub fn parse_one(input: &str) -> Result<Value, EvalError> {
    let mut exprs = parse(input)?;
    match exprs.len() {
        1 => Ok(exprs.remove(0)),
        0 => Err(parse_err("no expression to parse", 0)),
        _ => Err(parse_err("unexpected trailing input after expression", 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_list_as_nil() {
        assert_eq!(parse_one("()").unwrap(), Value::Nil);
    }

    #[test]
    fn parses_number_and_atom() {
        assert_eq!(parse_one("42").unwrap(), Value::int(42));
        assert_eq!(parse_one("foo").unwrap(), Value::atom("foo"));
    }

    #[test]
    fn parses_nested_list() {
        let v = parse_one("(1 (2 3) 4)").unwrap();
        assert_eq!(
            v,
            Value::list(vec![
                Value::int(1),
                Value::list(vec![Value::int(2), Value::int(3)]),
                Value::int(4),
            ])
        );
    }

    #[test]
    fn quote_wraps_the_next_complete_expression() {
        let v = parse_one("'(1 2)").unwrap();
        assert_eq!(
            v,
            Value::list(vec![
                Value::atom("quote"),
                Value::list(vec![Value::int(1), Value::int(2)]),
            ])
        );
    }

    #[test]
    fn nested_reader_macros() {
        let v = parse_one("`~@x").unwrap();
        assert_eq!(
            v,
            Value::list(vec![
                Value::atom("syntax-quote"),
                Value::list(vec![Value::atom("splicing-unquote"), Value::atom("x")]),
            ])
        );
    }

    #[test]
    fn parses_dotted_pair() {
        let v = parse_one("(a . b)").unwrap();
        assert_eq!(v, Value::cons(Value::atom("a"), Value::atom("b")));
    }

    #[test]
    fn parses_dotted_rest_param_list() {
        let v = parse_one("(x . xs)").unwrap();
        assert_eq!(v, Value::cons(Value::atom("x"), Value::atom("xs")));
    }

    #[test]
    fn unterminated_list_is_an_error() {
        assert!(parse_one("(1 2").is_err());
    }

    #[test]
    fn unexpected_closing_paren_is_an_error() {
        assert!(parse_one(")").is_err());
    }

    #[test]
    fn multiple_top_level_forms() {
        let exprs = parse("1 2 3").unwrap();
        assert_eq!(exprs, vec![Value::int(1), Value::int(2), Value::int(3)]);
    }

    #[test]
    fn quasiquote_splice_example() {
        let v = parse_one("`(1 ~(+ 1 1) ~@(list 3 4))").unwrap();
        let inner = Value::list(vec![
            Value::int(1),
            Value::list(vec![
                Value::atom("unquote"),
                Value::list(vec![Value::atom("+"), Value::int(1), Value::int(1)]),
            ]),
            Value::list(vec![
                Value::atom("splicing-unquote"),
                Value::list(vec![
                    Value::atom("list"),
                    Value::int(3),
                    Value::int(4),
                ]),
            ]),
        ]);
        assert_eq!(v, Value::list(vec![Value::atom("syntax-quote"), inner]));
    }
}
