//! Rule-set value object parameterising a board.

/// Variant switches for a single board.
///
/// Only [`RuleSet::bughouse`] is used for real games. The other flags let
/// tests and tools run the same board type with drops switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// Pocketed pieces may be dropped onto empty squares.
    pub drops: bool,
    /// When any capture is available, only captures are legal.
    pub capture_compulsory: bool,
}

impl RuleSet {
    /// Standard bughouse: drops on, captures optional.
    pub const fn bughouse() -> Self {
        Self {
            drops: true,
            capture_compulsory: false,
        }
    }

    /// Orthodox chess move rules on a bughouse board.
    pub const fn no_drops() -> Self {
        Self {
            drops: false,
            capture_compulsory: false,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::bughouse()
    }
}
