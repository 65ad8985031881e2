//! A miniature turn driver: deal from a shuffled deck, meld, then keep
//! recombining and substituting until someone goes out or the deck is dry.
//!
//! The engine itself never touches the deck or the turn order; that is all
//! here, the way an embedding application would do it.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tile_rummy_engine::{
    GameState, Tile, TileColor, find_best_melding_play, find_best_play, scoring,
    substitute_wildcards,
};

const PLAYERS: usize = 2;
const STARTING_HAND_SIZE: usize = 14;

struct Player {
    hand: Vec<Tile>,
    melded: bool,
}

fn build_deck() -> Vec<Tile> {
    let mut deck = Vec::new();
    for color in TileColor::ALL {
        for value in 1..=13 {
            for _ in 0..2 {
                deck.push(Tile::numbered(color, value));
            }
        }
    }
    deck.push(Tile::FreeWildcard);
    deck.push(Tile::FreeWildcard);
    deck
}

fn show(set: &[Tile]) -> String {
    set.iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut deck = build_deck();
    deck.shuffle(&mut rng);

    let mut players: Vec<Player> = (0..PLAYERS)
        .map(|_| Player {
            hand: deck.split_off(deck.len() - STARTING_HAND_SIZE),
            melded: false,
        })
        .collect();
    let mut board: Vec<Vec<Tile>> = Vec::new();

    println!("tile-rummy demo: {} players, {} tiles in the deck\n", PLAYERS, deck.len());

    'game: for turn in 1..=30 {
        for (index, player) in players.iter_mut().enumerate() {
            if deck.is_empty() {
                println!("deck is empty, stopping");
                break 'game;
            }

            let state = GameState {
                board: board.clone(),
                hand: player.hand.clone(),
            };
            let sets_before = state.board.len();
            let next = if player.melded {
                let substituted = substitute_wildcards(&state);
                find_best_play(&substituted)
            } else {
                find_best_melding_play(&state)
            };

            if next.board.len() > sets_before {
                if !player.melded {
                    println!("turn {:2}: player {} melds", turn, index + 1);
                    player.melded = true;
                } else {
                    println!("turn {:2}: player {} plays", turn, index + 1);
                }
                board = next.board;
                player.hand = next.hand;
            } else {
                player.hand.push(deck.pop().unwrap());
            }

            if player.hand.is_empty() {
                println!("\nplayer {} goes out on turn {}", index + 1, turn);
                break 'game;
            }
        }
    }

    println!("\nfinal board:");
    for set in &board {
        println!("  {}", show(set));
    }
    for (index, player) in players.iter().enumerate() {
        println!(
            "player {}: {} tiles left, {} points against",
            index + 1,
            player.hand.len(),
            scoring::hand_score(&player.hand)
        );
    }
}
