use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Card, CardCell, Coord2, GameError, LETTER_COUNT, Result};

/// Valid transitions:
/// - Setup -> Playing (player accepts the start prompt)
/// - any -> Setup (reset)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Numbers are still being placed on the card
    Setup,
    /// Numbers are locked in, only marking called numbers is allowed
    Playing,
}

impl GamePhase {
    pub const fn is_setup(self) -> bool {
        matches!(self, Self::Setup)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::Setup
    }
}

/// Outcome of tapping a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    NoChange,
    Placed(u8),
    Cleared,
    MarkChanged,
}

impl ToggleOutcome {
    /// Whether this outcome could have caused an update to the card
    pub const fn has_update(self) -> bool {
        use ToggleOutcome::*;
        match self {
            NoChange => false,
            Placed(_) => true,
            Cleared => true,
            MarkChanged => true,
        }
    }
}

/// One card lifetime from setup through play, the single source of truth
/// for everything that is rendered or persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    card: Card,
    letters: [bool; LETTER_COUNT],
    phase: GamePhase,
    ready_to_play_shown: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            card: Card::new(),
            letters: [false; LETTER_COUNT],
            phase: GamePhase::Setup,
            ready_to_play_shown: false,
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn cell_at(&self, coords: Coord2) -> CardCell {
        self.card.cell_at(coords)
    }

    pub fn all_filled(&self) -> bool {
        self.card.all_filled()
    }

    pub fn letter_active(&self, index: usize) -> bool {
        self.letters.get(index).copied().unwrap_or(false)
    }

    pub fn ready_to_play_shown(&self) -> bool {
        self.ready_to_play_shown
    }

    /// Tap a cell. In `Setup` an empty cell takes the least available
    /// number and a filled cell is cleared in place; in `Playing` only the
    /// mark on a filled cell is toggled and the number never changes.
    pub fn toggle_cell(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        use ToggleOutcome::*;

        let coords = self.card.validate_coords(coords)?;

        if self.phase.is_playing() {
            return Ok(match self.card.cell_at(coords) {
                CardCell::Empty => NoChange,
                CardCell::Filled(number) => {
                    self.card.put(coords, CardCell::Marked(number));
                    MarkChanged
                }
                CardCell::Marked(number) => {
                    self.card.put(coords, CardCell::Filled(number));
                    MarkChanged
                }
            });
        }

        match self.card.cell_at(coords) {
            CardCell::Empty => {
                let number = self
                    .card
                    .least_available()
                    .ok_or(GameError::PoolExhausted)?;
                self.card.put(coords, CardCell::Filled(number));
                Ok(Placed(number))
            }
            // Clearing is purely local; no other cell is renumbered.
            CardCell::Filled(_) | CardCell::Marked(_) => {
                self.card.put(coords, CardCell::Empty);
                Ok(Cleared)
            }
        }
    }

    /// Deal random unused numbers onto the empty cells, one each, until
    /// either cells or numbers run out. Returns how many were placed.
    pub fn random_fill(&mut self, seed: u64) -> Result<u8> {
        if self.phase.is_playing() {
            return Err(GameError::GameAlreadyStarted);
        }

        let empty = self.card.empty_coords();
        if empty.is_empty() {
            return Err(GameError::NothingToFill);
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let numbers = self.card.shuffled_available(&mut rng);

        let mut placed = 0;
        for (&coords, &number) in empty.iter().zip(numbers.iter()) {
            self.card.put(coords, CardCell::Filled(number));
            placed += 1;
        }
        Ok(placed)
    }

    /// Flip one of the letter toggles; they are independent of the card
    /// and accepted in any phase.
    pub fn toggle_letter(&mut self, index: usize) -> Result<bool> {
        let letter = self
            .letters
            .get_mut(index)
            .ok_or(GameError::InvalidLetter)?;
        *letter = !*letter;
        Ok(*letter)
    }

    /// One-shot start-prompt latch. Returns `true` at most once per card
    /// lifetime: the first time the card is full while still in `Setup`.
    /// Declining and then editing cells does not re-arm it; only `reset`
    /// does.
    pub fn take_start_prompt(&mut self) -> bool {
        if self.phase.is_setup() && self.card.all_filled() && !self.ready_to_play_shown {
            self.ready_to_play_shown = true;
            true
        } else {
            false
        }
    }

    /// Apply the player's answer to the start prompt. A declined prompt
    /// leaves the session in `Setup` with the latch still consumed.
    pub fn confirm_start(&mut self, accepted: bool) {
        if accepted && self.phase.is_setup() {
            self.phase = GamePhase::Playing;
        }
    }

    /// Return to a pristine setup session; allowed from any phase.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CARD_SIDE, CELL_COUNT, MAX_NUMBER};

    fn row_major() -> Vec<Coord2> {
        let mut coords = Vec::new();
        for row in 0..CARD_SIDE {
            for col in 0..CARD_SIDE {
                coords.push((row, col));
            }
        }
        coords
    }

    fn full_session() -> GameSession {
        let mut session = GameSession::new();
        for coords in row_major() {
            session.toggle_cell(coords).unwrap();
        }
        session
    }

    fn assert_numbers_unique(session: &GameSession) {
        let mut seen = [false; MAX_NUMBER as usize];
        for coords in row_major() {
            if let Some(number) = session.cell_at(coords).value() {
                assert!((1..=MAX_NUMBER).contains(&number));
                let slot = &mut seen[number as usize - 1];
                assert!(!*slot, "number {} placed twice", number);
                *slot = true;
            }
        }
    }

    #[test]
    fn setup_taps_place_numbers_in_visitation_order() {
        let mut session = GameSession::new();
        for (index, coords) in row_major().into_iter().enumerate() {
            let outcome = session.toggle_cell(coords).unwrap();
            assert_eq!(outcome, ToggleOutcome::Placed(index as u8 + 1));
        }

        assert!(session.all_filled());
        assert_numbers_unique(&session);
    }

    #[test]
    fn clearing_a_cell_leaves_every_other_cell_untouched() {
        let mut session = full_session();
        let before: Vec<CardCell> = row_major().iter().map(|&c| session.cell_at(c)).collect();

        assert_eq!(session.toggle_cell((2, 3)).unwrap(), ToggleOutcome::Cleared);

        for (index, coords) in row_major().into_iter().enumerate() {
            if coords == (2, 3) {
                assert_eq!(session.cell_at(coords), CardCell::Empty);
            } else {
                assert_eq!(session.cell_at(coords), before[index]);
            }
        }
    }

    #[test]
    fn cleared_number_is_the_next_least_available() {
        let mut session = full_session();
        let taken = session.cell_at((1, 1)).value().unwrap();
        session.toggle_cell((1, 1)).unwrap();

        assert_eq!(session.toggle_cell((1, 1)).unwrap(), ToggleOutcome::Placed(taken));
    }

    #[test]
    fn random_fill_deals_a_full_card_from_empty() {
        let mut session = GameSession::new();
        let placed = session.random_fill(7).unwrap();

        assert_eq!(placed, CELL_COUNT);
        assert!(session.all_filled());
        assert_numbers_unique(&session);
    }

    #[test]
    fn random_fill_is_deterministic_per_seed() {
        let mut first = GameSession::new();
        let mut second = GameSession::new();
        first.random_fill(1234).unwrap();
        second.random_fill(1234).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn random_fill_varies_across_seeds() {
        let layouts: Vec<Vec<u8>> = (0..32u64)
            .map(|seed| {
                let mut session = GameSession::new();
                session.random_fill(seed).unwrap();
                row_major()
                    .iter()
                    .map(|&coords| session.cell_at(coords).value().unwrap())
                    .collect()
            })
            .collect();

        assert!(layouts.iter().any(|layout| layout != &layouts[0]));

        // A fixed cell should see a healthy spread of values across seeds,
        // not a constant or near-constant one.
        let mut first_cell: Vec<u8> = layouts.iter().map(|layout| layout[0]).collect();
        first_cell.sort_unstable();
        first_cell.dedup();
        assert!(
            first_cell.len() >= 8,
            "only {} distinct values in 32 seeds",
            first_cell.len()
        );
    }

    #[test]
    fn random_fill_only_touches_empty_cells() {
        let mut session = GameSession::new();
        session.toggle_cell((0, 0)).unwrap();
        session.toggle_cell((4, 4)).unwrap();

        let placed = session.random_fill(99).unwrap();

        assert_eq!(placed, CELL_COUNT - 2);
        assert_eq!(session.cell_at((0, 0)), CardCell::Filled(1));
        assert_eq!(session.cell_at((4, 4)), CardCell::Filled(2));
        assert!(session.all_filled());
        assert_numbers_unique(&session);
    }

    #[test]
    fn random_fill_is_rejected_once_playing() {
        let mut session = full_session();
        session.take_start_prompt();
        session.confirm_start(true);

        let before = session.clone();
        assert_eq!(session.random_fill(5), Err(GameError::GameAlreadyStarted));
        assert_eq!(session, before);
    }

    #[test]
    fn random_fill_is_rejected_with_nothing_to_fill() {
        let mut session = full_session();
        let before = session.clone();

        assert_eq!(session.random_fill(5), Err(GameError::NothingToFill));
        assert_eq!(session, before);
    }

    #[test]
    fn start_prompt_fires_exactly_once_per_fill_completion() {
        let mut session = full_session();

        assert!(session.take_start_prompt());
        assert!(!session.take_start_prompt());

        // Declining, emptying and refilling must not re-arm the latch.
        session.confirm_start(false);
        assert!(session.phase().is_setup());
        session.toggle_cell((0, 0)).unwrap();
        session.toggle_cell((0, 0)).unwrap();
        assert!(session.all_filled());
        assert!(!session.take_start_prompt());

        session.reset();
        let mut session = full_session_from(session);
        assert!(session.take_start_prompt());
    }

    fn full_session_from(mut session: GameSession) -> GameSession {
        for coords in row_major() {
            if !session.cell_at(coords).is_filled() {
                session.toggle_cell(coords).unwrap();
            }
        }
        session
    }

    #[test]
    fn start_prompt_waits_for_a_full_card() {
        let mut session = GameSession::new();
        session.toggle_cell((0, 0)).unwrap();

        assert!(!session.take_start_prompt());
        assert!(!session.ready_to_play_shown());
    }

    #[test]
    fn playing_taps_toggle_marks_without_touching_numbers() {
        let mut session = full_session();
        session.take_start_prompt();
        session.confirm_start(true);
        assert!(session.phase().is_playing());

        let number = session.cell_at((3, 1)).value().unwrap();
        assert_eq!(
            session.toggle_cell((3, 1)).unwrap(),
            ToggleOutcome::MarkChanged
        );
        assert_eq!(session.cell_at((3, 1)), CardCell::Marked(number));

        assert_eq!(
            session.toggle_cell((3, 1)).unwrap(),
            ToggleOutcome::MarkChanged
        );
        assert_eq!(session.cell_at((3, 1)), CardCell::Filled(number));
    }

    #[test]
    fn playing_taps_on_empty_cells_are_silently_ignored() {
        let mut session = GameSession::new();
        session.toggle_cell((0, 0)).unwrap();
        // Confirmation is controller-driven, so the phase switch itself is
        // not gated on a full card.
        session.confirm_start(true);

        assert_eq!(
            session.toggle_cell((1, 1)).unwrap(),
            ToggleOutcome::NoChange
        );
        assert_eq!(session.cell_at((1, 1)), CardCell::Empty);
    }

    #[test]
    fn letters_toggle_independently_in_any_phase() {
        let mut session = full_session();
        assert_eq!(session.toggle_letter(0), Ok(true));
        assert_eq!(session.toggle_letter(0), Ok(false));

        session.take_start_prompt();
        session.confirm_start(true);
        assert_eq!(session.toggle_letter(4), Ok(true));
        assert!(session.letter_active(4));
        assert!(!session.letter_active(3));

        assert_eq!(session.toggle_letter(5), Err(GameError::InvalidLetter));
    }

    #[test]
    fn out_of_range_taps_are_rejected_without_mutation() {
        let mut session = GameSession::new();
        let before = session.clone();

        assert_eq!(session.toggle_cell((5, 2)), Err(GameError::InvalidCoords));
        assert_eq!(session, before);
    }

    #[test]
    fn reset_restores_a_pristine_setup_session() {
        let mut session = full_session();
        session.toggle_letter(1).unwrap();
        session.take_start_prompt();
        session.confirm_start(true);
        session.toggle_cell((0, 0)).unwrap();

        session.reset();

        assert_eq!(session, GameSession::new());
        assert!(session.phase().is_setup());
        assert!(!session.ready_to_play_shown());
        assert_eq!(session.card().filled_count(), 0);
    }
}
