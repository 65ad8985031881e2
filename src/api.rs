//! JSON representation of game state and play results.
//!
//! The WASM bindings are thin wrappers around these functions; everything
//! here is target-independent so the codec itself stays testable on the
//! host.

use crate::wildcards::WildcardAttachment;
use crate::{GameState, Tile, play, wildcards};
use serde::{Deserialize, Serialize};

/// JSON mirror of [`GameState`]: board sets and hand as tile strings.
#[derive(Serialize, Deserialize)]
pub struct GameStateJson {
    pub board: Vec<Vec<String>>,
    pub hand: Vec<String>,
}

/// Result of an engine call made through the JSON surface.
#[derive(Serialize, Deserialize)]
pub struct PlayOutcomeJson {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<GameStateJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Convert a game state to its JSON mirror.
pub fn game_state_to_json(state: &GameState) -> GameStateJson {
    GameStateJson {
        board: state
            .board
            .iter()
            .map(|set| set.iter().map(|t| t.to_string()).collect())
            .collect(),
        hand: state.hand.iter().map(|t| t.to_string()).collect(),
    }
}

/// Parse a game state from its JSON mirror.
pub fn game_state_from_json(json: &GameStateJson) -> Result<GameState, String> {
    let mut board = Vec::with_capacity(json.board.len());
    for set in &json.board {
        let mut tiles = Vec::with_capacity(set.len());
        for tile_str in set {
            tiles.push(Tile::from_string(tile_str)?);
        }
        board.push(tiles);
    }
    let mut hand = Vec::with_capacity(json.hand.len());
    for tile_str in &json.hand {
        hand.push(Tile::from_string(tile_str)?);
    }
    Ok(GameState { board, hand })
}

/// Parse an attachment policy name.
pub fn attachment_from_str(s: &str) -> Result<WildcardAttachment, String> {
    match s {
        "highest_score" => Ok(WildcardAttachment::HighestScore),
        "first_emitted" => Ok(WildcardAttachment::FirstEmitted),
        _ => Err(format!("Unknown attachment policy: {}", s)),
    }
}

/// Run `find_best_play` over a JSON game state. Returns a
/// [`PlayOutcomeJson`] as a JSON string.
pub fn find_best_play_json(state_json: &str, attachment: &str) -> String {
    respond(transform(state_json, |state| {
        let attachment = attachment_from_str(attachment)?;
        Ok(play::find_best_play_with(&state, attachment))
    }))
}

/// Run `find_best_melding_play` over a JSON game state.
pub fn find_best_melding_play_json(state_json: &str, attachment: &str) -> String {
    respond(transform(state_json, |state| {
        let attachment = attachment_from_str(attachment)?;
        Ok(play::find_best_melding_play_with(&state, attachment))
    }))
}

/// Run `substitute_wildcards` over a JSON game state.
pub fn substitute_wildcards_json(state_json: &str) -> String {
    respond(transform(state_json, |state| {
        Ok(wildcards::substitute_wildcards(&state))
    }))
}

fn transform<F>(state_json: &str, f: F) -> Result<GameState, String>
where
    F: FnOnce(GameState) -> Result<GameState, String>,
{
    let json: GameStateJson =
        serde_json::from_str(state_json).map_err(|e| format!("Invalid state JSON: {}", e))?;
    let state = game_state_from_json(&json)?;
    f(state)
}

fn respond(result: Result<GameState, String>) -> String {
    let outcome = match result {
        Ok(state) => PlayOutcomeJson {
            success: true,
            state: Some(game_state_to_json(&state)),
            error: None,
        },
        Err(error) => PlayOutcomeJson {
            success: false,
            state: None,
            error: Some(error),
        },
    };
    serde_json::to_string(&outcome)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"Serialization error: {}"}}"#, e))
}
