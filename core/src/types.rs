/// Single coordinate axis used for card rows and columns.
pub type Coord = u8;

/// Count type used for cell and number tallies.
pub type CellCount = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Cells per side of the card.
pub const CARD_SIDE: Coord = 5;

/// Total cells on the card.
pub const CELL_COUNT: CellCount = 25;

/// Largest placeable number; placeable numbers run `1..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 25;

/// Independent letter toggles above the card.
pub const LETTER_COUNT: usize = 5;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}
