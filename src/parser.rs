//! Build the declaration-level [`Schema`] from the token stream.

use crate::ast::*;
use crate::error::TransformError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Words that open a statement and therefore never name a field type.
const KEYWORDS: &[&str] = &[
    "syntax",
    "edition",
    "package",
    "import",
    "option",
    "message",
    "enum",
    "service",
    "rpc",
    "returns",
    "stream",
    "oneof",
    "extend",
    "extensions",
    "reserved",
    "map",
    "group",
];

const LABELS: &[&str] = &["optional", "required", "repeated"];

/// Parse schema source into declarations and type-position references.
pub fn parse(source: &str) -> Result<Schema, TransformError> {
    let tokens = tokenize(source)?;
    build_schema(&tokens)
}

fn build_schema(tokens: &[Token<'_>]) -> Result<Schema, TransformError> {
    let mut enums = Vec::new();
    let mut declarations = Vec::new();
    let mut type_refs = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        if tok.is_trivia() {
            i += 1;
            continue;
        }

        if let Some((name_idx, open_idx)) = declaration_head(tokens, i, "enum") {
            let close_idx = matching_brace(tokens, open_idx).ok_or_else(|| {
                TransformError::UnterminatedDeclaration {
                    enum_name: tokens[name_idx].text.to_string(),
                    line: tok.line,
                }
            })?;
            let name = tokens[name_idx].text.to_string();
            declarations.push(TypeDecl {
                kind: DeclKind::Enum,
                name: name.clone(),
                line: tok.line,
            });
            enums.push(EnumDecl {
                name,
                line: tok.line,
                span: tok.span.start..tokens[close_idx].span.end,
                statements: build_enum_body(&tokens[open_idx + 1..close_idx]),
            });
            i = close_idx + 1;
            continue;
        }

        for (keyword, kind) in [("message", DeclKind::Message), ("service", DeclKind::Service)] {
            if let Some((name_idx, _)) = declaration_head(tokens, i, keyword) {
                declarations.push(TypeDecl {
                    kind,
                    name: tokens[name_idx].text.to_string(),
                    line: tok.line,
                });
            }
        }

        if tok.kind == TokenKind::Ident && at_line_start(tokens, i) {
            if let Some(type_ref) = field_type_ref(tokens, i) {
                type_refs.push(type_ref);
            }
        }
        i += 1;
    }

    Ok(Schema {
        enums,
        declarations,
        type_refs,
    })
}

/// Matches `<keyword> Name {` at `i`; returns the indices of `Name` and `{`.
fn declaration_head(tokens: &[Token<'_>], i: usize, keyword: &str) -> Option<(usize, usize)> {
    if !tokens[i].is_ident(keyword) {
        return None;
    }
    let name_idx = next_significant(tokens, i + 1)?;
    if tokens[name_idx].kind != TokenKind::Ident {
        return None;
    }
    let open_idx = next_significant(tokens, name_idx + 1)?;
    tokens[open_idx].is_symbol('{').then_some((name_idx, open_idx))
}

fn next_significant(tokens: &[Token<'_>], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&j| !tokens[j].is_trivia())
}

fn matching_brace(tokens: &[Token<'_>], open_idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, t) in tokens.iter().enumerate().skip(open_idx) {
        if t.is_symbol('{') {
            depth += 1;
        } else if t.is_symbol('}') {
            depth -= 1;
            if depth == 0 {
                return Some(j);
            }
        }
    }
    None
}

/// Only whitespace separates token `i` from the previous line break (or document start).
fn at_line_start(tokens: &[Token<'_>], i: usize) -> bool {
    for t in tokens[..i].iter().rev() {
        if t.kind != TokenKind::Whitespace {
            return false;
        }
        if t.contains_newline() {
            return true;
        }
    }
    true
}

/// `Type name ...` or `<label> Type name ...` starting at the line-leading token `i`.
fn field_type_ref(tokens: &[Token<'_>], i: usize) -> Option<TypeRef> {
    let mut type_idx = i;
    if LABELS.contains(&tokens[i].text) {
        type_idx = next_significant(tokens, i + 1)?;
    }
    let ty = &tokens[type_idx];
    if ty.kind != TokenKind::Ident || KEYWORDS.contains(&ty.text) || LABELS.contains(&ty.text) {
        return None;
    }
    let field_idx = next_significant(tokens, type_idx + 1)?;
    if field_idx == type_idx + 1 || tokens[field_idx].kind != TokenKind::Ident {
        return None;
    }
    Some(TypeRef {
        name: ty.text.to_string(),
        span: ty.span.clone(),
        line: ty.line,
    })
}

/// Split the tokens between `{` and `}` into `;`-terminated statements.
fn build_enum_body(body: &[Token<'_>]) -> Vec<EnumStatement> {
    let mut statements = Vec::new();
    let mut current: Vec<&Token<'_>> = Vec::new();
    let mut depth = 0usize;
    for tok in body.iter().filter(|t| !t.is_trivia()) {
        if tok.kind == TokenKind::Symbol {
            match tok.text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                ";" if depth == 0 => {
                    if !current.is_empty() {
                        statements.push(build_enum_statement(&current));
                    }
                    current.clear();
                    continue;
                }
                _ => {}
            }
        }
        current.push(tok);
    }
    if !current.is_empty() {
        statements.push(build_enum_statement(&current));
    }
    statements
}

fn build_enum_statement(toks: &[&Token<'_>]) -> EnumStatement {
    let line = toks[0].line;
    if let Some((name, value)) = enum_member(toks) {
        return EnumStatement::Member { name, value, line };
    }
    if toks[0].is_ident("option") {
        if let Some((name, value)) = enum_option(&toks[1..]) {
            return EnumStatement::Option { name, value, line };
        }
    }
    if toks[0].is_ident("reserved") && toks.len() > 1 {
        return EnumStatement::Reserved { line };
    }
    EnumStatement::Other {
        text: join_texts(toks),
        line,
    }
}

/// `NAME = [-]INT [ '[' ... ']' ]`
fn enum_member(toks: &[&Token<'_>]) -> Option<(String, String)> {
    let [name, eq, rest @ ..] = toks else {
        return None;
    };
    if name.kind != TokenKind::Ident || !eq.is_symbol('=') {
        return None;
    }
    let (value, rest) = match rest {
        [minus, num, rest @ ..] if minus.is_symbol('-') && num.kind == TokenKind::Number => {
            (format!("-{}", num.text), rest)
        }
        [num, rest @ ..] if num.kind == TokenKind::Number => (num.text.to_string(), rest),
        _ => return None,
    };
    if !parse_int(&value) {
        return None;
    }
    match rest {
        [] => {}
        [open, .., close] if open.is_symbol('[') && close.is_symbol(']') => {}
        _ => return None,
    }
    Some((name.text.to_string(), value))
}

/// After `option`: `NAME = VALUE` or `(EXT.NAME) = VALUE`.
fn enum_option(toks: &[&Token<'_>]) -> Option<(OptionName, String)> {
    let eq = toks.iter().position(|t| t.is_symbol('='));
    let head = &toks[..eq.unwrap_or(toks.len())];
    let value = eq.map(|e| join_texts(&toks[e + 1..])).unwrap_or_default();
    let name = match head {
        [] => return None,
        [open, inner @ .., close] if open.is_symbol('(') && close.is_symbol(')') => {
            if inner.is_empty() {
                return None;
            }
            OptionName::Extension(inner.iter().map(|t| t.text).collect())
        }
        _ => OptionName::Builtin(head.iter().map(|t| t.text).collect()),
    };
    Some((name, value))
}

fn parse_int(s: &str) -> bool {
    let digits = s.trim_start_matches('-');
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn join_texts(toks: &[&Token<'_>]) -> String {
    toks.iter().map(|t| t.text).collect::<Vec<_>>().join(" ")
}
