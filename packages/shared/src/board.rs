//! Tic-Tac-Toe board rules.
//!
//! A board is a fixed 9-cell grid indexed 0..=8 in row-major order.
//! Placement only checks that the target cell is free; whose turn it is
//! belongs to the game session that owns the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight winning lines: 3 rows, 3 columns, 2 diagonals.
///
/// `evaluate` scans them in exactly this order, so when more than one
/// line completes at once (impossible under alternating play, but the
/// tie-break must still be deterministic) the first one listed wins.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The other mark.
    pub fn opponent(&self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Symbol::X),
            "O" | "o" => Ok(Symbol::O),
            _ => Err(()),
        }
    }
}

/// Result of evaluating a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A line is complete; `line` is the first matching entry of
    /// [`WIN_LINES`].
    Win { winner: Symbol, line: [usize; 3] },
    /// Every cell is filled and no line is complete.
    Draw,
    /// Free cells remain and no line is complete.
    InProgress,
}

/// A 3x3 grid of optional marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Symbol>; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Option<Symbol>; 9] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Symbol> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Indices of all free cells, ascending.
    pub fn free_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Places `symbol` at `index`. Returns `false` without mutating when
    /// the index is out of range or the cell is already taken.
    pub fn try_place(&mut self, index: usize, symbol: Symbol) -> bool {
        match self.cells.get(index) {
            Some(None) => {
                self.cells[index] = Some(symbol);
                true
            }
            _ => false,
        }
    }

    /// Scans [`WIN_LINES`] in order, then checks for a draw.
    pub fn evaluate(&self) -> Verdict {
        for line in WIN_LINES {
            let [a, b, c] = line;
            if let Some(winner) = self.cells[a] {
                if self.cells[b] == Some(winner) && self.cells[c] == Some(winner) {
                    return Verdict::Win { winner, line };
                }
            }
        }
        if self.is_full() {
            Verdict::Draw
        } else {
            Verdict::InProgress
        }
    }
}
