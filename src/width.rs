//! Unsigned integer width chosen to hold a bitmask.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    U32,
    U64,
}

impl Width {
    /// Smallest width holding `max_value`.
    pub fn for_value(max_value: u64) -> Width {
        if max_value <= u64::from(u32::MAX) {
            Width::U32
        } else {
            Width::U64
        }
    }

    /// Schema scalar type for this width.
    pub fn keyword(self) -> &'static str {
        match self {
            Width::U32 => "uint32",
            Width::U64 => "uint64",
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Width::U32 => 32,
            Width::U64 => 64,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
