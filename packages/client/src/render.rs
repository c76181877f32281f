//! Terminal rendering of boards and lobby lists.

use sanmoku_shared::board::Board;

use sanmoku_server::infrastructure::dto::websocket::ParticipantDto;

/// Renders a 3x3 grid; free cells show their index so the player knows
/// what to type.
fn grid(cells: [&str; 9]) -> String {
    let shown: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            if cell.is_empty() {
                index.to_string()
            } else {
                (*cell).to_string()
            }
        })
        .collect();
    format!(
        " {} | {} | {}\n---+---+---\n {} | {} | {}\n---+---+---\n {} | {} | {}\n",
        shown[0], shown[1], shown[2], shown[3], shown[4], shown[5], shown[6], shown[7], shown[8]
    )
}

/// Renders a domain board (local play).
pub fn render_board(board: &Board) -> String {
    let cells = board.cells().map(|cell| match cell {
        Some(symbol) => symbol.as_str(),
        None => "",
    });
    grid(cells)
}

/// Renders the wire form of a board (`""`/`"X"`/`"O"` cells).
pub fn render_wire_board(cells: &[String]) -> String {
    if cells.len() != 9 {
        return String::from("(malformed board)\n");
    }
    let refs: [&str; 9] = std::array::from_fn(|index| cells[index].as_str());
    grid(refs)
}

/// One line per participant, host and spectators marked.
pub fn render_participants(participants: &[ParticipantDto]) -> String {
    participants
        .iter()
        .map(|p| {
            let mut line = format!("  {} [{}]", p.name, p.symbol);
            if p.is_host {
                line.push_str(" (host)");
            }
            if !p.connected {
                line.push_str(" (disconnected)");
            }
            line.push('\n');
            line
        })
        .collect()
}
