//! Local play: two players at one terminal, or one player against the
//! AI heuristic. Both run the same board engine the server validates
//! with.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use sanmoku_shared::ai::best_move;
use sanmoku_shared::board::{Board, Symbol, Verdict};

use crate::error::ClientError;
use crate::render::render_board;

struct Scores {
    x: u32,
    o: u32,
}

/// Runs local games until the player quits. `vs_ai` seats the AI at 'O'.
pub fn run_local(vs_ai: bool) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new().map_err(|e| ClientError::Input(e.to_string()))?;
    let mut scores = Scores { x: 0, o: 0 };
    // the opener alternates: winner of the last round starts the next,
    // a draw flips the opener
    let mut opener = Symbol::X;

    if vs_ai {
        println!("You are X. The AI plays O. Enter a cell index (0-8) to move.");
    } else {
        println!("Two players at one keyboard. X begins. Enter a cell index (0-8) to move.");
    }

    loop {
        match play_round(&mut editor, vs_ai, opener)? {
            Some(Verdict::Win { winner, .. }) => {
                match winner {
                    Symbol::X => scores.x += 1,
                    Symbol::O => scores.o += 1,
                }
                opener = winner;
                println!("{winner} wins! Score X:{} O:{}", scores.x, scores.o);
            }
            Some(Verdict::Draw) => {
                opener = opener.opponent();
                println!("Draw. Score X:{} O:{}", scores.x, scores.o);
            }
            // quit mid-round
            _ => return Ok(()),
        }

        match editor.readline("play again? (y/n) ") {
            Ok(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Plays one round to its verdict; `None` means the player quit.
fn play_round(
    editor: &mut DefaultEditor,
    vs_ai: bool,
    opener: Symbol,
) -> Result<Option<Verdict>, ClientError> {
    let mut board = Board::new();
    let mut current = opener;

    loop {
        let cell = if vs_ai && current == Symbol::O {
            let Some(cell) = best_move(&board, Symbol::O) else {
                return Ok(Some(board.evaluate()));
            };
            println!("AI plays {cell}");
            cell
        } else {
            println!("{}", render_board(&board));
            match prompt_cell(editor, current)? {
                Some(cell) => cell,
                None => return Ok(None),
            }
        };

        if !board.try_place(cell, current) {
            println!("cell {cell} is taken, try another");
            continue;
        }

        match board.evaluate() {
            Verdict::InProgress => current = current.opponent(),
            verdict => {
                println!("{}", render_board(&board));
                return Ok(Some(verdict));
            }
        }
    }
}

fn prompt_cell(editor: &mut DefaultEditor, current: Symbol) -> Result<Option<usize>, ClientError> {
    loop {
        match editor.readline(&format!("{current}> ")) {
            Ok(line) => {
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                    return Ok(None);
                }
                match line.parse::<usize>() {
                    Ok(cell) if cell < 9 => return Ok(Some(cell)),
                    _ => println!("enter a cell index between 0 and 8, or 'q' to quit"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(ClientError::Input(e.to_string())),
        }
    }
}
