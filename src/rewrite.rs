//! Enum rewriting: renumber `option (bitmap)` enums as power-of-two flags.
//!
//! Each marked declaration is replaced by a single line
//! `enum Name { None = 0; A = 1; B = 2; ... }`. Source values, options,
//! `reserved` statements and comments inside the body are dropped. The width
//! needed for the largest flag is recorded per enum name so that field types
//! can be substituted afterwards.

use crate::ast::{EnumDecl, EnumStatement};
use crate::error::TransformError;
use crate::options::TransformOptions;
use crate::parser::parse;
use crate::width::Width;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/// Largest number of members a 64-bit mask can hold.
pub const MAX_FLAGS: usize = 64;

/// Result of the enum pass: rewritten text plus the types to substitute.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub text: String,
    pub types: TypeSubstitutionMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmaskType {
    pub width: Width,
    /// Number of bitmap enum declarations sharing this name.
    pub declarations: usize,
}

/// Enum name -> integer width, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSubstitutionMap {
    entries: BTreeMap<String, BitmaskType>,
}

impl TypeSubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bitmap enum. Same-named enums must agree on the width.
    pub fn record(&mut self, name: &str, width: Width, line: usize) -> Result<(), TransformError> {
        match self.entries.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(BitmaskType {
                    width,
                    declarations: 1,
                });
                Ok(())
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.width != width {
                    return Err(TransformError::AmbiguousSubstitution {
                        name: name.to_string(),
                        line,
                        reason: format!(
                            "declared again as a bitmap needing {} after an earlier one needing {}",
                            width, existing.width
                        ),
                    });
                }
                existing.declarations += 1;
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BitmaskType> {
        self.entries.get(name)
    }

    pub fn width(&self, name: &str) -> Option<Width> {
        self.get(name).map(|t| t.width)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BitmaskType)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered flag values for one enum; the sentinel comes first with value 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmaskAssignment {
    pub members: Vec<(String, u64)>,
}

impl BitmaskAssignment {
    /// Assign `sentinel = 0` then 1, 2, 4, ... to the members of `decl` in order.
    pub fn for_enum(decl: &EnumDecl, options: &TransformOptions) -> Result<Self, TransformError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::from([options.sentinel.as_str()]);
        let mut names = Vec::new();
        for statement in &decl.statements {
            match statement {
                EnumStatement::Member { name, line, .. } => {
                    if !seen.insert(name.as_str()) {
                        errors.push(TransformError::DuplicateMember {
                            enum_name: decl.name.clone(),
                            line: *line,
                            member: name.clone(),
                        });
                    }
                    names.push(name.as_str());
                }
                EnumStatement::Other { text, line } => {
                    errors.push(TransformError::MalformedMemberSyntax {
                        enum_name: decl.name.clone(),
                        line: *line,
                        text: text.clone(),
                    });
                }
                EnumStatement::Option { .. } | EnumStatement::Reserved { .. } => {}
            }
        }
        if names.len() > MAX_FLAGS {
            errors.push(TransformError::WidthOverflow {
                enum_name: decl.name.clone(),
                line: decl.line,
                members: names.len(),
            });
        }
        TransformError::aggregate(errors)?;

        let mut members = Vec::with_capacity(names.len() + 1);
        members.push((options.sentinel.clone(), 0));
        let mut value: u64 = 1;
        for (i, name) in names.iter().enumerate() {
            members.push((name.to_string(), value));
            if i + 1 < names.len() {
                value <<= 1;
            }
        }
        Ok(BitmaskAssignment { members })
    }

    /// Largest flag value, or 0 when there are no members besides the sentinel.
    pub fn max_value(&self) -> u64 {
        self.members.last().map(|(_, v)| *v).unwrap_or(0)
    }

    pub fn width(&self) -> Width {
        Width::for_value(self.max_value())
    }

    /// `None = 0; A = 1; B = 2; ` with a trailing space.
    pub fn render_body(&self) -> String {
        self.members
            .iter()
            .map(|(name, value)| format!("{} = {}; ", name, value))
            .collect()
    }
}

fn render_enum(name: &str, assignment: &BitmaskAssignment) -> String {
    format!("enum {} {{ {}}}", name, assignment.render_body())
}

/// Rewrite every marked enum in `source`. Unmarked enums are copied byte for byte.
pub fn rewrite_enums(source: &str, options: &TransformOptions) -> Result<Rewrite, TransformError> {
    let schema = parse(source)?;
    let mut types = TypeSubstitutionMap::new();
    let mut errors = Vec::new();
    let mut text = String::with_capacity(source.len());
    let mut copied = 0;

    for decl in schema.enums.iter().filter(|e| e.has_marker(&options.marker)) {
        let assignment = match BitmaskAssignment::for_enum(decl, options) {
            Ok(a) => a,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        let width = assignment.width();
        if let Err(e) = types.record(&decl.name, width, decl.line) {
            errors.push(e);
            continue;
        }
        tracing::debug!(
            enum_name = %decl.name,
            line = decl.line,
            members = assignment.members.len() - 1,
            bits = width.bits(),
            "rewrote bitmap enum"
        );
        text.push_str(&source[copied..decl.span.start]);
        text.push_str(&render_enum(&decl.name, &assignment));
        copied = decl.span.end;
    }
    TransformError::aggregate(errors)?;

    text.push_str(&source[copied..]);
    Ok(Rewrite { text, types })
}
