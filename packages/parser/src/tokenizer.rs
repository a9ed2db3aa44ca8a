use crate::ast::Span;
use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::fmt;

/// Tokens of a CSS stylesheet, only as fine-grained as custom property
/// extraction needs
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(skip r"/\*([^*]|\*[^/])*\*/")]
pub enum Token<'src> {
    #[regex(r"--[A-Za-z0-9_-]+", |lex| lex.slice())]
    CustomProperty(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| lex.slice())]
    String(&'src str),

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("/")]
    Slash,

    // Selectors, at-rule names, numbers, units, hex colors, keywords
    #[regex(r#"[^\s:;{}(),"'/]+"#, |lex| lex.slice())]
    Word(&'src str),
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::CustomProperty(s) => write!(f, "custom property '{}'", s),
            Token::String(s) => write!(f, "string {}", s),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Comma => write!(f, "','"),
            Token::Slash => write!(f, "'/'"),
            Token::Word(s) => write!(f, "'{}'", s),
        }
    }
}

/// Tokenize a stylesheet, failing on the first unrecognized input
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token<'_>, Span)>> {
    Token::lexer(source)
        .spanned()
        .map(|(token, range)| match token {
            Ok(token) => Ok((token, Span::from(range))),
            Err(()) => Err(ParseError::LexError {
                span: Span::from(range),
            }),
        })
        .collect()
}
