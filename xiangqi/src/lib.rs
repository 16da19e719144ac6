//! 中国象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 各棋子的走法规则判定
//! - 走法生成、将军/将死/困毙/飞将判定
//! - 对局状态机（走棋、悔棋、历史记录）
//! - FEN 局面表示与中文纵线表示法

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod notation;
mod piece;
pub mod rules;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, MoveError, UndoError};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{new_game, GameState, GameStatus, HistoryEntry, MoveOutcome, Snapshot};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, PieceType, Position, Side};
pub use rules::is_legal;
