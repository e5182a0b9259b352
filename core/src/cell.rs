use serde::{Deserialize, Serialize};

/// Canonical player-visible state of one card cell.
///
/// A marked cell always carries its number, so a mark can only exist on a
/// filled cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardCell {
    Empty,
    Filled(u8),
    Marked(u8),
}

impl CardCell {
    pub const fn value(self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::Filled(number) | Self::Marked(number) => Some(number),
        }
    }

    pub const fn is_filled(self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Marked(_))
    }
}

impl Default for CardCell {
    fn default() -> Self {
        Self::Empty
    }
}
