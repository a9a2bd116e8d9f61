//! Tokenize schema source with PEST.
//!
//! The grammar is lossless: concatenating the text of every token reproduces
//! the input exactly, so later stages can splice replacements by byte span.

use crate::error::TransformError;
use pest::Parser;
use pest_derive::Parser as PestParser;
use std::ops::Range;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SchemaLexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    String,
    Ident,
    Number,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
    /// 1-based line of the first byte.
    pub line: usize,
}

impl Token<'_> {
    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_ident(&self, s: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == s
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n')
    }
}

/// Split source into tokens covering every byte.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TransformError> {
    let pairs = SchemaLexer::parse(Rule::document, source)
        .map_err(|e| TransformError::Syntax(e.to_string()))?;
    let document = pairs.into_iter().next().ok_or_else(|| {
        TransformError::Syntax("empty token stream".to_string())
    })?;

    let mut tokens = Vec::new();
    let mut line = 1;
    for pair in document.into_inner() {
        let kind = match pair.as_rule() {
            Rule::ws => TokenKind::Whitespace,
            Rule::line_comment => TokenKind::LineComment,
            Rule::block_comment => TokenKind::BlockComment,
            Rule::string => TokenKind::String,
            Rule::ident => TokenKind::Ident,
            Rule::number => TokenKind::Number,
            Rule::symbol => TokenKind::Symbol,
            Rule::EOI => continue,
            other => {
                return Err(TransformError::Syntax(format!(
                    "unexpected token rule: {:?}",
                    other
                )))
            }
        };
        let span = pair.as_span();
        let text = span.as_str();
        tokens.push(Token {
            kind,
            text,
            span: span.start()..span.end(),
            line,
        });
        line += text.matches('\n').count();
    }
    Ok(tokens)
}
