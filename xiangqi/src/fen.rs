//! FEN 格式解析和生成
//!
//! 中国象棋 FEN 格式：
//! `<棋盘> <走子方> <无吃子步数> <回合数>`
//!
//! 示例：
//! `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1`

use crate::board::Board;
use crate::error::ChessError;
use crate::game::GameState;
use crate::piece::{Piece, Position, Side};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为对局状态
    ///
    /// 计数字段可省略，解析时忽略。局面需通过 [`GameState::from_board`] 的校验。
    pub fn parse(fen: &str) -> Result<GameState, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let Some(board_str) = parts.first() else {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        };

        let board = Self::parse_board(board_str)?;

        // 解析走子方（默认红方）
        let turn = match parts.get(1) {
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", field),
                        })
                    }
                }
            }
            None => Side::Red,
        };

        GameState::from_board(board, turn)
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != 10 {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected 10 rows, got {}", rows.len()),
            });
        }

        // FEN 从上到下是 y=9 到 y=0
        for (row_idx, row) in rows.iter().enumerate() {
            let y = 9 - row_idx as u8;
            let mut x = 0u8;

            for c in row.chars() {
                if x >= 9 {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    // 空格数量
                    x += empty_count as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Position::new_unchecked(x, y), Some(piece));
                    x += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if x != 9 {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected 9", row_idx, x),
                });
            }
        }

        Ok(board)
    }

    /// 将对局状态转换为 FEN 字符串
    pub fn to_string(state: &GameState) -> String {
        format!(
            "{} {} 0 {}",
            Self::board_to_string(state.board()),
            state.turn().to_fen_char(),
            1 + state.history().len() / 2
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(10);

        // 从 y=9 到 y=0
        for y in (0..10).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for x in 0..9 {
                if let Some(piece) = board.get(Position::new_unchecked(x, y)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;
    use crate::piece::PieceType;

    #[test]
    fn test_parse_initial_fen() {
        let state = Fen::parse(INITIAL_FEN).unwrap();

        assert_eq!(state.turn(), Side::Red);
        assert_eq!(state.board(), &Board::initial());

        // 检查红方炮
        let cannon = state.board().get(Position::new_unchecked(1, 2));
        assert_eq!(cannon, Some(Piece::new(PieceType::Cannon, Side::Red)));
    }

    #[test]
    fn test_initial_fen_matches_new_game() {
        assert_eq!(Fen::to_string(&GameState::new()), INITIAL_FEN);
    }

    #[test]
    fn test_fen_after_moves() {
        let mut state = GameState::new();
        state
            .attempt_move(Position::new_unchecked(7, 2), Position::new_unchecked(4, 2))
            .unwrap();
        assert_eq!(
            Fen::to_string(&state),
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b 0 1"
        );

        state
            .attempt_move(Position::new_unchecked(7, 9), Position::new_unchecked(6, 7))
            .unwrap();
        let fen = Fen::to_string(&state);
        assert!(fen.ends_with(" r 0 2"));

        let parsed = Fen::parse(&fen).unwrap();
        assert_eq!(parsed.board(), state.board());
        assert_eq!(parsed.turn(), state.turn());
    }

    #[test]
    fn test_parse_custom_fen() {
        let state = Fen::parse("3k5/9/9/9/9/9/9/9/9/4K4 b 10 5").unwrap();

        assert_eq!(state.turn(), Side::Black);
        assert_eq!(state.board().find_king(Side::Red), Some(Position::new_unchecked(4, 0)));
        assert_eq!(state.board().find_king(Side::Black), Some(Position::new_unchecked(3, 9)));
        assert_eq!(state.status(), GameStatus::InProgress);

        // 走子方可以用 w 表示红方，计数字段可省略
        let state = Fen::parse("3k5/9/9/9/9/9/9/9/9/4K4 w").unwrap();
        assert_eq!(state.turn(), Side::Red);
        let state = Fen::parse("3k5/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert_eq!(state.turn(), Side::Red);
    }

    #[test]
    fn test_invalid_fen() {
        // 空串
        assert!(Fen::parse("").is_err());

        // 行数不对
        assert!(Fen::parse("4k4/9/9").is_err());

        // 列数不对
        assert!(Fen::parse("4k44/9/9/9/9/9/9/9/9/4K4 r").is_err());
        assert!(Fen::parse("4k3/9/9/9/9/9/9/9/9/4K4 r").is_err());

        // 无效字符
        assert!(Fen::parse("4x4/9/9/9/9/9/9/9/9/4K4 r").is_err());

        // 无效走子方
        assert!(Fen::parse("3k5/9/9/9/9/9/9/9/9/4K4 x").is_err());
    }

    #[test]
    fn test_fen_rejects_invalid_setup() {
        // 将帅照面
        assert!(matches!(
            Fen::parse("4k4/9/9/9/9/9/9/9/9/4K4 r"),
            Err(ChessError::InvalidSetup { .. })
        ));
        // 缺少黑将
        assert!(matches!(
            Fen::parse("9/9/9/9/9/9/9/9/9/4K4 r"),
            Err(ChessError::InvalidSetup { .. })
        ));
    }
}
