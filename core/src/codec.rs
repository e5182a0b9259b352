//! Serialization of the whole session for the key-value blob store.

use crate::GameSession;

/// Serialize a session into a storage blob.
pub fn encode(session: &GameSession) -> Result<String, serde_json::Error> {
    serde_json::to_string(session)
}

/// Restore a session from a stored blob. A malformed blob is logged and
/// treated as "no prior state"; it never propagates an error.
pub fn decode(raw: &str) -> Option<GameSession> {
    match serde_json::from_str::<GameSession>(raw) {
        Ok(session) if !session.card().is_expected_shape() => {
            log::warn!("Discarding saved game: board shape does not match the card size");
            None
        }
        Ok(session) => Some(session),
        Err(err) => {
            log::warn!("Discarding unreadable saved game: {}", err);
            None
        }
    }
}
