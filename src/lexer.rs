// ABOUTME: Lexer turning source text into a token stream for the parser

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, one_of},
    combinator::{opt, recognize},
    multi::many0,
    sequence::pair,
    IResult, Parser,
};
use num_bigint::BigInt;
use std::str::FromStr;

/// The atom alphabet beyond digits and ASCII letters (§4.B).
const ATOM_SYMBOLS: &str = "+*/-_!=<>?[]{}&$^";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Lp,
    Rp,
    Num(BigInt),
    Atom(String),
    Quote,
    SyntaxQuote,
    Unquote,
    SpliceUnquote,
    /// The `.` of a dotted-pair literal, e.g. `(a . b)`. Not part of the
    /// atom alphabet, so it is tokenized separately from `ATOM_SYMBOLS`.
    Dot,
}

/// A token paired with the byte offset it started at, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

fn is_atom_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_alphabetic() || ATOM_SYMBOLS.contains(c)
}

fn skip_ignorable(input: &str) -> &str {
    let mut rest = input;
    loop {
        let trimmed = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        if trimmed.starts_with(';') {
            rest = match trimmed.find('\n') {
                Some(pos) => &trimmed[pos + 1..],
                None => "",
            };
            continue;
        }
        if trimmed.len() == rest.len() {
            return trimmed;
        }
        rest = trimmed;
    }
}

fn lex_number(input: &str) -> IResult<&str, Token> {
    let (rest, text) = recognize(pair(opt(one_of("+-")), digit1)).parse(input)?;
    let n = BigInt::from_str(text).map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, Token::Num(n)))
}

fn lex_atom(input: &str) -> IResult<&str, Token> {
    let (rest, text) = recognize(many0(nom::character::complete::satisfy(is_atom_char))).parse(input)?;
    if text.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }
    Ok((rest, Token::Atom(text.to_string())))
}

fn lex_reader_macro(input: &str) -> IResult<&str, Token> {
    alt((
        nom::combinator::value(Token::SpliceUnquote, tag("~@")),
        nom::combinator::value(Token::Unquote, char('~')),
        nom::combinator::value(Token::SyntaxQuote, char('`')),
        nom::combinator::value(Token::Quote, char('\'')),
    ))
    .parse(input)
}

fn lex_one(input: &str) -> Result<(Token, &str), String> {
    if let Some(rest) = input.strip_prefix('(') {
        return Ok((Token::Lp, rest));
    }
    if let Some(rest) = input.strip_prefix(')') {
        return Ok((Token::Rp, rest));
    }
    if let Some(rest) = input.strip_prefix('.') {
        let boundary = rest.chars().next().map(|c| !is_atom_char(c)).unwrap_or(true);
        if boundary {
            return Ok((Token::Dot, rest));
        }
    }
    if let Ok((rest, tok)) = lex_reader_macro(input) {
        return Ok((tok, rest));
    }

    let starts_number_attempt = input
        .chars()
        .next()
        .map(|c| c == '-' || c == '+' || c.is_ascii_digit())
        .unwrap_or(false);

    if starts_number_attempt {
        if let Ok((rest, tok)) = lex_number(input) {
            // A lone sign with no following digits falls through to atom lexing.
            return Ok((tok, rest));
        }
    }

    if let Ok((rest, tok)) = lex_atom(input) {
        return Ok((tok, rest));
    }

    let bad = input.chars().next().unwrap_or('\0');
    Err(format!("unexpected character '{}'", bad))
}

/// Tokenize a full source string. On the first unlexable character, returns
/// an error carrying a human-readable message and the byte position.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, (String, usize)> {
    let mut tokens = Vec::new();
    let mut rest = input;
    let mut consumed = 0usize;

    loop {
        let before_ws = rest;
        rest = skip_ignorable(rest);
        consumed += before_ws.len() - rest.len();

        if rest.is_empty() {
            break;
        }

        let position = consumed;
        match lex_one(rest) {
            Ok((token, tail)) => {
                consumed += rest.len() - tail.len();
                rest = tail;
                tokens.push(Spanned { token, position });
            }
            Err(message) => return Err((message, position)),
        }
    }

    Ok(tokens)
}

/// A balance predicate over a token list so a REPL can decide whether more
/// input is needed: parens must all close, and the stream must not end with
/// a reader-macro token still awaiting the form it wraps.
pub fn tokens_balanced(tokens: &[Token]) -> bool {
    let mut depth: i32 = 0;
    for token in tokens {
        match token {
            Token::Lp => depth += 1,
            Token::Rp => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return true; // an excess `)` is a real error, not "need more input"
        }
    }
    if depth != 0 {
        return false;
    }
    !matches!(
        tokens.last(),
        Some(Token::Quote) | Some(Token::SyntaxQuote) | Some(Token::Unquote) | Some(Token::SpliceUnquote)
    )
}
