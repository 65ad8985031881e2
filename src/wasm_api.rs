//! WASM bindings: thin wrappers over the JSON surface in [`crate::api`].

use crate::api;
use wasm_bindgen::prelude::*;

/// Install the panic hook so failures surface in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Recombine the hand and eligible board sets.
///
/// # Arguments
/// * `state_json` - JSON game state, e.g. `{"board":[["r7","r8","r9"]],"hand":["w"]}`
/// * `attachment` - leftover wildcard policy: "highest_score" or "first_emitted"
///
/// Returns a JSON `PlayOutcomeJson` string.
#[wasm_bindgen]
pub fn find_best_play(state_json: &str, attachment: &str) -> String {
    api::find_best_play_json(state_json, attachment)
}

/// Find a qualifying first play from the hand alone.
#[wasm_bindgen]
pub fn find_best_melding_play(state_json: &str, attachment: &str) -> String {
    api::find_best_melding_play_json(state_json, attachment)
}

/// Swap bound wildcards on the board for matching hand tiles.
#[wasm_bindgen]
pub fn substitute_wildcards(state_json: &str) -> String {
    api::substitute_wildcards_json(state_json)
}

/// The git commit this module was built from, or "unknown".
#[wasm_bindgen]
pub fn build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_find_best_play_smoke() {
        let result = find_best_play(r#"{"board":[],"hand":["r7","r8","r9"]}"#, "highest_score");
        assert!(result.contains(r#""success":true"#));
    }

    #[wasm_bindgen_test]
    fn test_invalid_state_smoke() {
        let result = find_best_play("not json", "highest_score");
        assert!(result.contains(r#""success":false"#));
    }
}
