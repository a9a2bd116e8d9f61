//! # proto-bitmap — bitmask enums for protobuf schemas
//!
//! A preprocessing pass over `.proto` source. Enums carrying the custom
//! `option (bitmap) = true;` are renumbered as power-of-two flags with a
//! zero-valued `None` sentinel, and every field declared with such an enum
//! type is retyped to the smallest unsigned integer holding the mask.
//!
//! ## Example
//!
//! ```text
//! enum Flags {                      enum Flags { None = 0; A = 1; B = 2; C = 4; }
//!   option (bitmap) = true;
//!   A = 1;                    =>
//!   B = 2;
//!   C = 4;
//! }
//! message M {                       message M {
//!   Flags perms = 1;                  uint32 perms = 1;
//! }                                 }
//! ```
//!
//! ## Passes
//!
//! 1. [`rewrite_enums`] renumbers marked enums and returns a [`TypeSubstitutionMap`].
//! 2. [`substitute_types`] rewrites field types using that map.
//!
//! [`transform`] runs both in order. Up to 32 flags select `uint32`, up to 64
//! select `uint64`; more fail with [`TransformError::WidthOverflow`]. Any error
//! fails the whole document.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod rewrite;
pub mod substitute;
pub mod width;

pub use error::TransformError;
pub use options::{TransformOptions, BITMAP_OPTION, SENTINEL_MEMBER};
pub use parser::parse;
pub use rewrite::{rewrite_enums, BitmaskAssignment, BitmaskType, Rewrite, TypeSubstitutionMap};
pub use substitute::substitute_types;
pub use width::Width;

/// Rewrite bitmap enums and their field types with the default marker and sentinel.
pub fn transform(source: &str) -> Result<String, TransformError> {
    transform_with(source, &TransformOptions::default())
}

pub fn transform_with(source: &str, options: &TransformOptions) -> Result<String, TransformError> {
    let Rewrite { text, types } = rewrite_enums(source, options)?;
    tracing::debug!(bitmap_types = types.len(), "enum pass done");
    substitute_types(&text, &types)
}
