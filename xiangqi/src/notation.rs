//! 中文纵线表示法
//!
//! 红方：从右往左数，使用中文数字（一二三四五六七八九）
//! 黑方：从左往右数，使用阿拉伯数字（1-9）
//!
//! 格式：<棋子><起始列><动作><目标>
//! - 动作：进（向前）、退（向后）、平（横走）
//! - 目标：平移时为目标列，进退时为步数
//! - 同列有两个及以上同类棋子时，用前/中/後 代替起始列

use crate::board::Board;
use crate::game::GameState;
use crate::moves::Move;
use crate::piece::{Position, Side};

/// 中文数字
const CHINESE_NUMBERS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 阿拉伯数字
const ARABIC_NUMBERS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// 纵线表示法
pub struct Notation;

impl Notation {
    /// 将走法转换为中文纵线表示法
    ///
    /// `board` 必须是走棋之前的局面。坐标越界或起点无子时返回 `None`。
    pub fn to_chinese(board: &Board, mv: &Move) -> Option<String> {
        if !mv.from.is_valid() || !mv.to.is_valid() {
            return None;
        }
        let piece = board.get(mv.from)?;
        let side = piece.side;
        let (action, target) = Self::action_and_target(mv, side);

        // 查找同列同类型的棋子，按离己方底线远近排序
        let mut same_column: Vec<Position> = (0..10)
            .map(|y| Position::new_unchecked(mv.from.x, y))
            .filter(|&pos| board.get(pos) == Some(piece))
            .collect();
        match side {
            Side::Red => same_column.sort_by_key(|p| p.y),
            Side::Black => same_column.sort_by_key(|p| std::cmp::Reverse(p.y)),
        }

        if same_column.len() <= 1 {
            let from_col = Self::column_notation(mv.from.x, side);
            return Some(format!("{}{}{}{}", piece.display_char(), from_col, action, target));
        }

        let index = same_column.iter().position(|&p| p == mv.from)?;
        let prefix = match index {
            0 => '後',
            i if i == same_column.len() - 1 => '前',
            _ => '中',
        };

        Some(format!("{}{}{}{}", prefix, piece.display_char(), action, target))
    }

    /// 对局历史的全部表示法
    ///
    /// 从当前局面逐步回退，得到每一步走棋前的局面。
    pub fn for_history(state: &GameState) -> Vec<String> {
        let mut board = state.board().clone();
        let mut notations: Vec<String> = state
            .history()
            .iter()
            .rev()
            .map(|entry| {
                board.set(entry.mv.from, Some(entry.piece));
                board.set(entry.mv.to, entry.captured);
                Self::to_chinese(&board, &entry.mv).unwrap_or_else(|| entry.mv.to_iccs())
            })
            .collect();
        notations.reverse();
        notations
    }

    /// 获取列的表示
    fn column_notation(x: u8, side: Side) -> char {
        match side {
            // 红方从右往左：x=8 是一，x=0 是九
            Side::Red => CHINESE_NUMBERS[(8 - x) as usize],
            // 黑方从左往右：x=0 是 1，x=8 是 9
            Side::Black => ARABIC_NUMBERS[x as usize],
        }
    }

    /// 获取步数的表示
    fn steps_notation(steps: u8, side: Side) -> char {
        let index = steps.saturating_sub(1) as usize;
        match side {
            Side::Red => CHINESE_NUMBERS[index],
            Side::Black => ARABIC_NUMBERS[index],
        }
    }

    /// 获取动作和目标
    fn action_and_target(mv: &Move, side: Side) -> (char, char) {
        let dx = mv.to.x as i8 - mv.from.x as i8;
        let dy = mv.to.y as i8 - mv.from.y as i8;

        if dy == 0 {
            return ('平', Self::column_notation(mv.to.x, side));
        }

        let action = if dy.signum() == side.forward() { '進' } else { '退' };
        if dx == 0 {
            // 直线进退，目标为步数
            (action, Self::steps_notation(dy.unsigned_abs(), side))
        } else {
            // 斜线移动（马、象、士），目标为列
            (action, Self::column_notation(mv.to.x, side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceType};

    fn pos(x: u8, y: u8) -> Position {
        Position::new_unchecked(x, y)
    }

    fn notation(board: &Board, from: Position, to: Position) -> String {
        Notation::to_chinese(board, &Move::new(from, to)).unwrap()
    }

    #[test]
    fn test_cannon_notation() {
        // 炮二平五（红方右边的炮平到中间）
        let board = Board::initial();
        assert_eq!(notation(&board, pos(7, 2), pos(4, 2)), "炮二平五");
    }

    #[test]
    fn test_soldier_notation() {
        // 兵七进一（红方第三列的兵前进一步）
        let board = Board::initial();
        assert_eq!(notation(&board, pos(2, 3), pos(2, 4)), "兵七進一");
    }

    #[test]
    fn test_knight_notation() {
        let board = Board::initial();
        assert_eq!(notation(&board, pos(7, 0), pos(6, 2)), "傌二進三");
        assert_eq!(notation(&board, pos(1, 9), pos(2, 7)), "馬2進3");
    }

    #[test]
    fn test_column_notation() {
        assert_eq!(Notation::column_notation(8, Side::Red), '一');
        assert_eq!(Notation::column_notation(4, Side::Red), '五');
        assert_eq!(Notation::column_notation(0, Side::Red), '九');

        assert_eq!(Notation::column_notation(0, Side::Black), '1');
        assert_eq!(Notation::column_notation(4, Side::Black), '5');
        assert_eq!(Notation::column_notation(8, Side::Black), '9');
    }

    #[test]
    fn test_rook_advance_and_retreat() {
        let mut board = Board::empty();
        board.set(pos(0, 5), Some(Piece::new(PieceType::Rook, Side::Red)));
        board.set(pos(0, 9), Some(Piece::new(PieceType::Rook, Side::Black)));

        assert_eq!(notation(&board, pos(0, 5), pos(0, 2)), "俥九退三");
        assert_eq!(notation(&board, pos(0, 9), pos(0, 6)), "車1進3");
    }

    #[test]
    fn test_diagonal_pieces() {
        let mut board = Board::empty();
        board.set(pos(4, 1), Some(Piece::new(PieceType::Advisor, Side::Red)));
        board.set(pos(2, 0), Some(Piece::new(PieceType::Bishop, Side::Red)));
        board.set(pos(2, 7), Some(Piece::new(PieceType::Knight, Side::Black)));

        assert_eq!(notation(&board, pos(4, 1), pos(3, 2)), "仕五進六");
        assert_eq!(notation(&board, pos(2, 0), pos(4, 2)), "相七進五");
        assert_eq!(notation(&board, pos(2, 7), pos(1, 9)), "馬3退2");
    }

    #[test]
    fn test_black_cannon_horizontal() {
        let board = Board::initial();
        assert_eq!(notation(&board, pos(1, 7), pos(4, 7)), "砲2平5");
    }

    #[test]
    fn test_disambiguation() {
        // 同列两个兵
        let mut board = Board::empty();
        board.set(pos(4, 5), Some(Piece::new(PieceType::Soldier, Side::Red)));
        board.set(pos(4, 6), Some(Piece::new(PieceType::Soldier, Side::Red)));

        assert_eq!(notation(&board, pos(4, 6), pos(4, 7)), "前兵進一");
        assert_eq!(notation(&board, pos(4, 5), pos(3, 5)), "後兵平六");

        // 同列三个兵
        board.set(pos(4, 7), Some(Piece::new(PieceType::Soldier, Side::Red)));
        assert_eq!(notation(&board, pos(4, 6), pos(3, 6)), "中兵平六");

        // 黑方从上往下数
        let mut board = Board::empty();
        board.set(pos(0, 9), Some(Piece::new(PieceType::Rook, Side::Black)));
        board.set(pos(0, 5), Some(Piece::new(PieceType::Rook, Side::Black)));
        assert_eq!(notation(&board, pos(0, 5), pos(0, 3)), "前車進2");
    }

    #[test]
    fn test_empty_square() {
        let board = Board::empty();
        assert!(Notation::to_chinese(&board, &Move::new(pos(0, 0), pos(0, 1))).is_none());
    }

    #[test]
    fn test_out_of_range_square() {
        let board = Board::initial();
        // 车横走出棋盘
        assert!(Notation::to_chinese(&board, &Move::new(pos(0, 0), pos(9, 0))).is_none());
        assert!(Notation::to_chinese(&board, &Move::new(pos(8, 9), pos(8, 10))).is_none());
        assert!(Notation::to_chinese(&board, &Move::new(pos(9, 0), pos(8, 0))).is_none());
    }

    #[test]
    fn test_for_history() {
        let mut state = GameState::new();
        state.attempt_move(pos(7, 2), pos(4, 2)).unwrap();
        state.attempt_move(pos(7, 9), pos(6, 7)).unwrap();
        state.attempt_move(pos(4, 2), pos(4, 6)).unwrap();

        assert_eq!(
            Notation::for_history(&state),
            vec!["炮二平五", "馬8進7", "炮五進四"]
        );
    }
}
