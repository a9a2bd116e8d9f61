//! Declaration-level view of a schema document.
//!
//! Only what the rewrite passes need is modelled: enum declarations with their
//! body statements, the names every message/enum/service declares, and the
//! identifiers that sit in field-type position.

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct Schema {
    pub enums: Vec<EnumDecl>,
    pub declarations: Vec<TypeDecl>,
    pub type_refs: Vec<TypeRef>,
}

impl Schema {
    /// How many message, enum or service declarations use `name`.
    pub fn declaration_count(&self, name: &str) -> usize {
        self.declarations.iter().filter(|d| d.name == name).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Message,
    Enum,
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: DeclKind,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub line: usize,
    /// From the `enum` keyword through the closing `}`.
    pub span: Range<usize>,
    pub statements: Vec<EnumStatement>,
}

impl EnumDecl {
    /// True when the body carries `option (<marker>) = ...;`.
    pub fn has_marker(&self, marker: &str) -> bool {
        self.statements.iter().any(|s| match s {
            EnumStatement::Option { name, .. } => name.is_extension(marker),
            _ => false,
        })
    }

    pub fn members(&self) -> impl Iterator<Item = &EnumStatement> {
        self.statements
            .iter()
            .filter(|s| matches!(s, EnumStatement::Member { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumStatement {
    Member {
        name: String,
        value: String,
        line: usize,
    },
    Option {
        name: OptionName,
        value: String,
        line: usize,
    },
    /// `reserved 2, 15, 9 to 11;` or `reserved "FOO";`
    Reserved { line: usize },
    /// Anything that is none of the above, whitespace-normalised.
    Other { text: String, line: usize },
}

impl EnumStatement {
    pub fn line(&self) -> usize {
        match self {
            EnumStatement::Member { line, .. }
            | EnumStatement::Option { line, .. }
            | EnumStatement::Reserved { line }
            | EnumStatement::Other { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionName {
    /// `option allow_alias = true;`
    Builtin(String),
    /// `option (bitmap) = true;`
    Extension(String),
}

impl OptionName {
    pub fn is_extension(&self, name: &str) -> bool {
        matches!(self, OptionName::Extension(n) if n == name)
    }
}

/// An identifier in field-type position, e.g. `Flags` in `  Flags perms = 1;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub span: Range<usize>,
    pub line: usize,
}
