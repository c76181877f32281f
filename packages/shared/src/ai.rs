//! Heuristic computer opponent.
//!
//! Move preference, in order: win now, block the opponent's win, take
//! the center, take a random free corner, take a random free side, take
//! any remaining cell. The random picks are uniform so repeated games do
//! not play out identically.

use rand::seq::SliceRandom;

use crate::board::{Board, Symbol, Verdict};

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Picks the next cell for `me` on `board`, or `None` when the board is
/// full.
pub fn best_move(board: &Board, me: Symbol) -> Option<usize> {
    if let Some(cell) = winning_move(board, me) {
        return Some(cell);
    }
    if let Some(cell) = winning_move(board, me.opponent()) {
        return Some(cell);
    }
    if board.cell(CENTER).is_none() {
        return Some(CENTER);
    }

    let mut rng = rand::thread_rng();

    let free_corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&c| board.cell(c).is_none())
        .collect();
    if let Some(&cell) = free_corners.choose(&mut rng) {
        return Some(cell);
    }

    let free_sides: Vec<usize> = SIDES
        .iter()
        .copied()
        .filter(|&c| board.cell(c).is_none())
        .collect();
    if let Some(&cell) = free_sides.choose(&mut rng) {
        return Some(cell);
    }

    board.free_cells().choose(&mut rng).copied()
}

/// The cell that completes a line for `who`, if one exists.
fn winning_move(board: &Board, who: Symbol) -> Option<usize> {
    for cell in board.free_cells() {
        let mut probe = *board;
        probe.try_place(cell, who);
        if matches!(probe.evaluate(), Verdict::Win { winner, .. } if winner == who) {
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(pattern: &str) -> Board {
        let mut b = Board::new();
        for (i, ch) in pattern.chars().enumerate() {
            match ch {
                'X' => assert!(b.try_place(i, Symbol::X)),
                'O' => assert!(b.try_place(i, Symbol::O)),
                '.' => {}
                other => panic!("unexpected cell char: {other}"),
            }
        }
        b
    }

    #[test]
    fn test_takes_its_own_winning_move() {
        // given: O can win at 5, X threatens at 2
        let b = board("XX.OO..X.");

        // then: winning beats blocking
        assert_eq!(best_move(&b, Symbol::O), Some(5));
    }

    #[test]
    fn test_blocks_the_opponents_winning_move() {
        // given: X threatens the top row at 2, O has no win available
        let b = board("XX..O....");

        // then:
        assert_eq!(best_move(&b, Symbol::O), Some(2));
    }

    #[test]
    fn test_prefers_center_when_no_line_is_at_stake() {
        // given:
        let b = board("X........");

        // then:
        assert_eq!(best_move(&b, Symbol::O), Some(CENTER));
    }

    #[test]
    fn test_prefers_a_free_corner_over_a_side() {
        // given: center is taken, nothing to win or block
        let b = board("....X....");

        // when:
        let cell = best_move(&b, Symbol::O).unwrap();

        // then:
        assert!(CORNERS.contains(&cell), "expected a corner, got {cell}");
    }

    #[test]
    fn test_picked_cell_is_always_free() {
        // given: a midgame position with threats in both directions
        let b = board("XO.X.O...");

        // when:
        let cell = best_move(&b, Symbol::X).unwrap();

        // then:
        assert!(b.cell(cell).is_none());
    }

    #[test]
    fn test_returns_none_on_a_full_board() {
        let b = board("XOXXOOOXX");
        assert_eq!(best_move(&b, Symbol::X), None);
    }
}
