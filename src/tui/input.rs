//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use pairs_core::SlotIndex;

/// Moves the cursor on a `side` × `side` grid based on arrow keys.
///
/// The cursor stops at the edges; other keys leave it unchanged.
pub fn move_cursor(cursor: SlotIndex, side: usize, key: KeyCode) -> SlotIndex {
    if side == 0 {
        return cursor;
    }
    let (row, col) = (cursor / side, cursor % side);
    match key {
        KeyCode::Right if col + 1 < side => cursor + 1,
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Down if row + 1 < side => cursor + side,
        KeyCode::Up if row > 0 => cursor - side,
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(move_cursor(0, 4, KeyCode::Right), 1);
        assert_eq!(move_cursor(0, 4, KeyCode::Down), 4);
        assert_eq!(move_cursor(5, 4, KeyCode::Up), 1);
        assert_eq!(move_cursor(5, 4, KeyCode::Left), 4);
    }

    #[test]
    fn test_stops_at_edges() {
        assert_eq!(move_cursor(3, 4, KeyCode::Right), 3);
        assert_eq!(move_cursor(4, 4, KeyCode::Left), 4);
        assert_eq!(move_cursor(1, 4, KeyCode::Up), 1);
        assert_eq!(move_cursor(14, 4, KeyCode::Down), 14);
    }

    #[test]
    fn test_ignores_other_keys() {
        assert_eq!(move_cursor(2, 2, KeyCode::Char('x')), 2);
        assert_eq!(move_cursor(2, 0, KeyCode::Right), 2);
    }
}
