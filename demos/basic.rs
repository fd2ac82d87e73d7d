//! Basic example of using the tile-swap engine

use tileswap_core::{
    Generator, GeneratorConfig, Position, Puzzle, PuzzleDefinition, Session, SessionState,
};

fn main() {
    // Jumble the built-in puzzle
    println!("Jumbling the sample puzzle...\n");
    let puzzle = Puzzle::sample();
    let mut generator = Generator::with_seed(2024);
    let shuffle = match generator.generate(puzzle.solved()) {
        Ok(shuffle) => shuffle,
        Err(e) => {
            eprintln!("Could not jumble puzzle: {}", e);
            return;
        }
    };

    println!("Solved grid:");
    println!("{}", puzzle.solved());
    println!("Jumbled grid:");
    println!("{}", shuffle.grid);
    println!("Clues: {}\n", puzzle.clue_text());

    // Walk the jumble back, one swap per turn
    println!("Replaying the jumble in reverse...\n");
    let mut session = match Session::with_generator(puzzle, Generator::with_seed(2024)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Could not start session: {}", e);
            return;
        }
    };
    for &(a, b) in shuffle.swaps.iter().rev() {
        if session.state() != SessionState::Playing {
            break;
        }
        let outcome = session.attempt_move(a, b);
        println!("swap {} <-> {}: {:?}", a, b, outcome);
    }
    println!("\nTurns: {}  State: {}", session.turn_label(), session.state());

    // An illegal move is rejected without using a turn
    session.undo();
    let outcome = session.attempt_move(Position::new(0, 0), Position::new(1, 1));
    println!("Diagonal swap: {:?} (turns {})", outcome, session.turn_label());

    // Load a puzzle from JSON
    println!("\n--- Loading a puzzle from JSON ---\n");
    let json = r#"{"words": [
        {"word": "CAT", "clue": "Purring pet"},
        {"word": "ARE", "clue": "Plural of is"},
        {"word": "TEN", "clue": "Digits on two hands"}
    ]}"#;
    match serde_json::from_str::<PuzzleDefinition>(json)
        .map_err(|e| e.to_string())
        .and_then(|def| {
            Session::from_definition(def, GeneratorConfig::random_walk(4))
                .map_err(|e| e.to_string())
        }) {
        Ok(session) => {
            println!("Jumbled:");
            println!("{}", session.grid());
            println!("Turn budget: {}", session.max_turns());
        }
        Err(e) => println!("Invalid puzzle: {}", e),
    }
}
