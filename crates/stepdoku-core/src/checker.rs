//! Uniqueness checks for candidate placements.
//!
//! Each check scans the full row, column, or block, including the target
//! cell itself. Callers consult the checker *before* writing a candidate,
//! so the target cell still holds 0 and a candidate (always >= 1) can
//! never collide with it. All three checks follow the same rule.

use crate::{Board, Position};

/// True iff no cell in `row` currently holds `value`.
pub fn row_ok(board: &Board, value: u8, row: usize) -> bool {
    (0..board.size()).all(|col| board.get(Position::new(row, col)) != value)
}

/// True iff no cell in `col` currently holds `value`.
pub fn col_ok(board: &Board, value: u8, col: usize) -> bool {
    (0..board.size()).all(|row| board.get(Position::new(row, col)) != value)
}

/// True iff no cell in the block containing `pos` currently holds `value`.
pub fn block_ok(board: &Board, value: u8, pos: Position) -> bool {
    let dim = board.block_dim();
    let block_row = pos.row / dim * dim;
    let block_col = pos.col / dim * dim;
    for row in block_row..block_row + dim {
        for col in block_col..block_col + dim {
            if board.get(Position::new(row, col)) == value {
                return false;
            }
        }
    }
    true
}

/// True iff `value` may be placed at `pos` without duplicating it in the
/// cell's row, column, or block.
///
/// The scan does not exclude `pos` itself, so call this while the cell is
/// still empty; a value already written there counts as a conflict.
pub fn is_valid(board: &Board, value: u8, pos: Position) -> bool {
    row_ok(board, value, pos.row) && col_ok(board, value, pos.col) && block_ok(board, value, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_rows(&[
            vec![1, 2, 3, 0],
            vec![3, 0, 1, 2],
            vec![2, 1, 0, 3],
            vec![0, 3, 2, 1],
        ])
        .unwrap()
    }

    #[test]
    fn test_row_ok() {
        let board = board();
        assert!(row_ok(&board, 4, 0));
        assert!(!row_ok(&board, 2, 0));
        assert!(row_ok(&board, 4, 3));
        assert!(!row_ok(&board, 1, 3));
    }

    #[test]
    fn test_col_ok() {
        let board = board();
        assert!(col_ok(&board, 4, 0));
        assert!(!col_ok(&board, 3, 0));
        assert!(col_ok(&board, 4, 3));
        assert!(!col_ok(&board, 2, 3));
    }

    #[test]
    fn test_block_ok() {
        let board = board();
        // top-left block holds 1, 2, 3
        assert!(block_ok(&board, 4, Position::new(1, 1)));
        assert!(!block_ok(&board, 3, Position::new(1, 1)));
        // bottom-right block holds 3, 2, 1
        assert!(block_ok(&board, 4, Position::new(2, 2)));
        assert!(!block_ok(&board, 1, Position::new(2, 2)));
    }

    #[test]
    fn test_is_valid() {
        let board = board();
        assert!(is_valid(&board, 4, Position::new(0, 3)));
        assert!(is_valid(&board, 4, Position::new(1, 1)));
        assert!(is_valid(&board, 4, Position::new(3, 0)));
        // 2 sits in row 0 already
        assert!(!is_valid(&board, 2, Position::new(0, 3)));
        // 1 sits in column 2 already
        assert!(!is_valid(&board, 1, Position::new(2, 2)));
    }

    #[test]
    fn test_scan_includes_target_cell() {
        // The checks run against current contents, target cell included:
        // a value already written at the target always conflicts with
        // itself. The solver avoids this by checking before writing.
        let board = board();
        let pos = Position::new(0, 0);
        assert!(!is_valid(&board, board.get(pos), pos));
    }

    #[test]
    fn test_checks_on_9x9() {
        let board: Board =
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
                .parse()
                .unwrap();
        // (0, 2): row holds 5, 3, 7; column holds 8; block holds 5, 3, 6, 9, 8
        let pos = Position::new(0, 2);
        assert!(is_valid(&board, 4, pos));
        assert!(!is_valid(&board, 5, pos));
        assert!(!is_valid(&board, 8, pos));
        assert!(!is_valid(&board, 9, pos));
    }
}
