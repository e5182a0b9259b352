use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{CARD_SIDE, CardCell, CellCount, Coord2, GameError, MAX_NUMBER, Result, ToNdIndex};

/// The 5x5 grid of cells. Owns every cell slot; the number pool is always
/// recomputed from the grid so the two can never drift apart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    grid: Array2<CardCell>,
}

impl Card {
    pub fn new() -> Self {
        Self {
            grid: Array2::default([CARD_SIDE as usize, CARD_SIDE as usize]),
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < CARD_SIDE && coords.1 < CARD_SIDE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CardCell {
        self.grid[coords.to_nd_index()]
    }

    pub(crate) fn put(&mut self, coords: Coord2, cell: CardCell) {
        self.grid[coords.to_nd_index()] = cell;
    }

    pub fn filled_count(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|cell| cell.is_filled())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn all_filled(&self) -> bool {
        self.grid.iter().all(|cell| cell.is_filled())
    }

    /// Whether the grid has the declared card shape. Deserialization can
    /// construct a grid of any dimensions, so restored cards are checked
    /// before use.
    pub fn is_expected_shape(&self) -> bool {
        self.grid.dim() == (CARD_SIDE as usize, CARD_SIDE as usize)
    }

    fn is_used(&self, number: u8) -> bool {
        self.grid.iter().any(|cell| cell.value() == Some(number))
    }

    /// First number in `1..=MAX_NUMBER` not placed anywhere on the card.
    pub fn least_available(&self) -> Option<u8> {
        (1..=MAX_NUMBER).find(|&number| !self.is_used(number))
    }

    /// Every unplaced number in uniformly random order.
    pub fn shuffled_available<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let mut available: Vec<u8> = (1..=MAX_NUMBER)
            .filter(|&number| !self.is_used(number))
            .collect();
        available.shuffle(rng);
        available
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_coords(&self) -> Vec<Coord2> {
        let mut coords = Vec::new();
        for row in 0..CARD_SIDE {
            for col in 0..CARD_SIDE {
                if !self.cell_at((row, col)).is_filled() {
                    coords.push((row, col));
                }
            }
        }
        coords
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}
