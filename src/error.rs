//! Transformation failures. Any error aborts the whole document.

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Syntax: {0}")]
    Syntax(String),
    #[error("line {line}: enum `{enum_name}` has no closing `}}`")]
    UnterminatedDeclaration { enum_name: String, line: usize },
    #[error("line {line}: enum `{enum_name}`: malformed member `{text}` (expected `NAME = VALUE;`)")]
    MalformedMemberSyntax {
        enum_name: String,
        line: usize,
        text: String,
    },
    #[error("line {line}: enum `{enum_name}`: duplicate member `{member}`")]
    DuplicateMember {
        enum_name: String,
        line: usize,
        member: String,
    },
    #[error("line {line}: enum `{enum_name}`: {members} members need a {members}-bit mask, wider than 64 bits")]
    WidthOverflow {
        enum_name: String,
        line: usize,
        members: usize,
    },
    #[error("line {line}: type `{name}` is ambiguous: {reason}")]
    AmbiguousSubstitution {
        name: String,
        line: usize,
        reason: String,
    },
    #[error("{} errors:\n{}", .0.len(), join_lines(.0))]
    Multiple(Vec<TransformError>),
}

impl TransformError {
    /// Collapse per-declaration failures into one result.
    pub fn aggregate(errors: Vec<TransformError>) -> Result<(), TransformError> {
        let mut errors: Vec<TransformError> = errors
            .into_iter()
            .flat_map(|e| match e {
                TransformError::Multiple(inner) => inner,
                other => vec![other],
            })
            .collect();
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(TransformError::Multiple(errors)),
        }
    }
}

fn join_lines(errors: &[TransformError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
