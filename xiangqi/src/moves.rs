//! 走法生成和验证

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::MoveError;
use crate::piece::{Piece, PieceType, Position, Side};
use crate::rules;

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// ICCS 格式，如 `h2e2`
    pub fn to_iccs(&self) -> String {
        format!("{}{}", self.from.to_iccs(), self.to.to_iccs())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const BISHOP_STEPS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];
const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有伪合法走法（不考虑将军和飞将）
    pub fn generate_pseudo_legal(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (pos, piece) in board.pieces(side) {
            Self::generate_piece_moves(board, pos, piece, &mut moves);
        }

        moves
    }

    /// 生成指定阵营的所有合法走法（过滤掉送将和飞将）
    pub fn generate_legal(board: &Board, side: Side) -> Vec<Move> {
        Self::generate_pseudo_legal(board, side)
            .into_iter()
            .filter(|mv| Self::violation_after(board, *mv, side).is_none())
            .collect()
    }

    /// 指定阵营是否至少有一步合法走法
    pub fn has_legal_move(board: &Board, side: Side) -> bool {
        Self::generate_pseudo_legal(board, side)
            .into_iter()
            .any(|mv| Self::violation_after(board, mv, side).is_none())
    }

    /// 生成指定棋子的所有伪合法走法
    ///
    /// 先按棋子几何列出候选终点，再交给 [`rules::is_legal`] 判定，
    /// 保证生成结果与单步校验一致。
    fn generate_piece_moves(board: &Board, pos: Position, piece: Piece, moves: &mut Vec<Move>) {
        let candidates: Vec<Position> = match piece.piece_type {
            PieceType::King => Self::steps(pos, &ORTHOGONAL),
            PieceType::Advisor => Self::steps(pos, &DIAGONAL),
            PieceType::Bishop => Self::steps(pos, &BISHOP_STEPS),
            PieceType::Knight => Self::steps(pos, &KNIGHT_STEPS),
            PieceType::Rook | PieceType::Cannon => Self::lines(pos),
            PieceType::Soldier => {
                let forward = piece.side.forward();
                Self::steps(pos, &[(0, forward), (1, 0), (-1, 0)])
            }
        };

        moves.extend(
            candidates
                .into_iter()
                .filter(|&to| rules::is_legal(board, piece, pos, to))
                .map(|to| Move::new(pos, to)),
        );
    }

    /// 固定偏移的候选终点
    fn steps(pos: Position, offsets: &[(i8, i8)]) -> Vec<Position> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .collect()
    }

    /// 同行同列的所有候选终点
    fn lines(pos: Position) -> Vec<Position> {
        let files = (0..BOARD_WIDTH as u8).map(|x| Position::new_unchecked(x, pos.y));
        let ranks = (0..BOARD_HEIGHT as u8).map(|y| Position::new_unchecked(pos.x, y));
        files.chain(ranks).filter(|&to| to != pos).collect()
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        match board.find_king(side) {
            Some(king_pos) => rules::is_attacked(board, king_pos, side.opponent()),
            // 没有将，视为不被将军
            None => false,
        }
    }

    /// 模拟走法，检查走后局面是否违规
    ///
    /// 走后己方被将军返回 `IllegalMove`，将帅照面返回 `IllegalFacing`。
    pub fn violation_after(board: &Board, mv: Move, side: Side) -> Option<MoveError> {
        let mut test_board = board.clone();
        test_board.move_piece(mv.from, mv.to);

        if Self::is_in_check(&test_board, side) {
            Some(MoveError::IllegalMove {
                from: mv.from,
                to: mv.to,
            })
        } else if test_board.kings_facing() {
            Some(MoveError::IllegalFacing)
        } else {
            None
        }
    }
}
