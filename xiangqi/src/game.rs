//! 对局状态机
//!
//! [`GameState`] 独占唯一的棋盘，只有成功的走棋和悔棋会修改它。
//! 所有操作都是同步的，调用方负责串行化对同一对局的访问。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::error::{ChessError, MoveError, UndoError};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Piece, PieceType, Position, Side};
use crate::rules;

/// 对局状态（总是针对当前走子方）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// 正常进行
    InProgress,
    /// 该方被将军
    Check(Side),
    /// 该方被将死
    Checkmate(Side),
    /// 该方未被将军但无子可动（困毙，判负）
    Stalemate(Side),
}

impl GameStatus {
    /// 对局是否已结束
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate(_))
    }

    /// 胜方（将死和困毙都判被困方负）
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameStatus::Checkmate(loser) | GameStatus::Stalemate(loser) => Some(loser.opponent()),
            _ => None,
        }
    }
}

/// 历史记录项，保存足够信息用于悔棋
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 走法
    pub mv: Move,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

/// 走棋结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// 已执行的走法
    pub mv: Move,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 走棋后的状态（针对新的走子方）
    pub status: GameStatus,
}

/// 局面快照，供渲染使用
///
/// 拥有数据的副本，可以反复遍历，不随对局变化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 当前走子方
    pub turn: Side,
    /// 当前状态
    pub status: GameStatus,
    pieces: Vec<(Position, Piece)>,
}

impl Snapshot {
    /// 遍历所有有子的格子
    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces.iter().copied()
    }

    /// 棋子数量
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// 是否没有棋子
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// 查询某格的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.pieces
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, piece)| *piece)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (Position, Piece);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (Position, Piece)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter().copied()
    }
}

/// 对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Side,
    history: Vec<HistoryEntry>,
    status: GameStatus,
}

/// 新对局：标准开局，红方先走
pub fn new_game() -> GameState {
    GameState::new()
}

impl GameState {
    /// 创建标准开局
    pub fn new() -> Self {
        let board = Board::initial();
        let status = Self::evaluate_status(&board, Side::Red);
        Self {
            board,
            turn: Side::Red,
            history: Vec::new(),
            status,
        }
    }

    /// 从自定义局面创建
    ///
    /// 要求双方各有且仅有一个将且在九宫内、将帅不照面、
    /// 非走子方不处于被将军状态。
    pub fn from_board(board: Board, turn: Side) -> Result<Self, ChessError> {
        Self::validate_setup(&board, turn)?;
        let status = Self::evaluate_status(&board, turn);
        Ok(Self {
            board,
            turn,
            history: Vec::new(),
            status,
        })
    }

    fn validate_setup(board: &Board, turn: Side) -> Result<(), ChessError> {
        let invalid = |reason: String| Err(ChessError::InvalidSetup { reason });

        for side in [Side::Red, Side::Black] {
            let kings = board.count(Piece::new(PieceType::King, side));
            if kings != 1 {
                return invalid(format!("{:?} must have exactly one king, found {}", side, kings));
            }
            if let Some(king_pos) = board.find_king(side) {
                if !king_pos.is_in_palace(side) {
                    return invalid(format!("{:?} king at {} is outside the palace", side, king_pos));
                }
            }
        }

        if board.kings_facing() {
            return invalid("kings are facing each other".to_string());
        }
        if MoveGenerator::is_in_check(board, turn.opponent()) {
            return invalid(format!("{:?} is in check but it is not their turn", turn.opponent()));
        }
        Ok(())
    }

    /// 只读棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// 当前状态
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// 已执行的走法
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// 指定阵营是否被将军
    pub fn is_in_check(&self, side: Side) -> bool {
        MoveGenerator::is_in_check(&self.board, side)
    }

    /// 当前走子方的所有合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        MoveGenerator::generate_legal(&self.board, self.turn)
    }

    /// 局面快照
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            status: self.status,
            pieces: self.board.all_pieces(),
        }
    }

    /// 校验走法但不执行
    pub fn validate_move(&self, from: Position, to: Position) -> Result<Move, MoveError> {
        self.checked_move(from, to).map(|(mv, _)| mv)
    }

    /// 按顺序校验走法，返回走法和起点棋子
    fn checked_move(&self, from: Position, to: Position) -> Result<(Move, Piece), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !from.is_valid() || !to.is_valid() {
            return Err(MoveError::IllegalMove { from, to });
        }

        let piece = self
            .board
            .get(from)
            .ok_or(MoveError::NoPieceAtSource { pos: from })?;
        if piece.side != self.turn {
            return Err(MoveError::WrongTurn {
                expected: self.turn,
                actual: piece.side,
            });
        }

        if !rules::is_legal(&self.board, piece, from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let mv = Move::new(from, to);
        match MoveGenerator::violation_after(&self.board, mv, self.turn) {
            Some(err) => Err(err),
            None => Ok((mv, piece)),
        }
    }

    /// 尝试走棋
    ///
    /// 成功时修改棋盘、记录历史、切换走子方并重新计算状态；
    /// 失败时状态不变。
    pub fn attempt_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        let (mv, piece) = self.checked_move(from, to).inspect_err(|err| {
            trace!(turn = ?self.turn, from = %from, to = %to, "拒绝走法: {}", err);
        })?;

        let captured = self.board.move_piece(mv.from, mv.to);
        self.history.push(HistoryEntry { mv, piece, captured });
        self.switch_turn();

        debug!(
            mv = %mv.to_iccs(),
            captured = ?captured.map(|p| p.piece_type),
            status = ?self.status,
            "执行走法"
        );

        Ok(MoveOutcome {
            mv,
            captured,
            status: self.status,
        })
    }

    /// 悔棋：撤销最后一步，恢复被吃的棋子
    pub fn undo_last_move(&mut self) -> Result<(), UndoError> {
        let entry = self.history.pop().ok_or(UndoError::NothingToUndo)?;

        self.board.set(entry.mv.from, Some(entry.piece));
        self.board.set(entry.mv.to, entry.captured);
        self.switch_turn();

        debug!(mv = %entry.mv.to_iccs(), status = ?self.status, "悔棋");
        Ok(())
    }

    /// 切换走子方并重新计算状态
    fn switch_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.status = Self::evaluate_status(&self.board, self.turn);

        match self.status {
            GameStatus::Checkmate(side) => info!("{}被将死", side.display_name()),
            GameStatus::Stalemate(side) => info!("{}被困毙", side.display_name()),
            _ => {}
        }
    }

    /// 计算指定走子方的状态
    fn evaluate_status(board: &Board, turn: Side) -> GameStatus {
        let in_check = MoveGenerator::is_in_check(board, turn);
        let can_move = MoveGenerator::has_legal_move(board, turn);

        match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate(turn),
            (false, false) => GameStatus::Stalemate(turn),
            (true, true) => GameStatus::Check(turn),
            (false, true) => GameStatus::InProgress,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
