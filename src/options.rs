//! Transformation settings.

/// Extension option that selects an enum for rewriting: `option (bitmap) = true;`.
pub const BITMAP_OPTION: &str = "bitmap";

/// Zero-valued member inserted first in every rewritten enum.
pub const SENTINEL_MEMBER: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Name inside `option (...)` that marks a bitmap enum.
    pub marker: String,
    pub sentinel: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            marker: BITMAP_OPTION.to_string(),
            sentinel: SENTINEL_MEMBER.to_string(),
        }
    }
}
