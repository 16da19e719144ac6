//! 错误类型定义

use thiserror::Error;

use crate::piece::{Position, Side};

/// 走棋错误
///
/// 任何返回该错误的调用都不会修改对局状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// 对局已结束（将死或困毙）
    #[error("Game is already over")]
    GameOver,

    /// 起点没有棋子
    #[error("No piece at position {pos}")]
    NoPieceAtSource { pos: Position },

    /// 不是该方的回合
    #[error("Not your turn: {expected:?} to move, got a {actual:?} piece")]
    WrongTurn { expected: Side, actual: Side },

    /// 不符合走法规则，或走后己方被将军
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 走后将帅照面
    #[error("Move would leave the kings facing each other")]
    IllegalFacing,
}

/// 悔棋错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UndoError {
    /// 没有可悔的棋
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// 象棋局面错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 无效的坐标文本（如 "j3"、"a10"）
    #[error("Invalid square: {text:?}")]
    InvalidSquare { text: String },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 不合法的局面
    #[error("Invalid setup: {reason}")]
    InvalidSetup { reason: String },
}
