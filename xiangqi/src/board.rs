//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_SQUARES, BOARD_WIDTH};
use crate::piece::{Piece, PieceType, Position, Side};

/// 底线棋子排列：车马相仕帅仕相马车
const BACK_RANK: [PieceType; 9] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Advisor,
    PieceType::King,
    PieceType::Advisor,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 炮所在列
const CANNON_FILES: [u8; 2] = [1, 7];

/// 兵/卒所在列
const SOLDIER_FILES: [u8; 5] = [0, 2, 4, 6, 8];

/// 棋盘
///
/// 只负责存放棋子，不做任何规则检查。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 9x10 棋盘，索引为 y * 9 + x，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SQUARES],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// 清空棋盘并摆放 32 个棋子的标准开局
    pub fn setup_initial_position(&mut self) {
        self.squares.iter_mut().for_each(|sq| *sq = None);

        for side in [Side::Red, Side::Black] {
            // 红方底线 y=0，黑方底线 y=9，其余行按河界镜像
            let (back, cannon, soldier) = match side {
                Side::Red => (0, 2, 3),
                Side::Black => (9, 7, 6),
            };

            for (x, piece_type) in BACK_RANK.iter().enumerate() {
                self.set(
                    Position::new_unchecked(x as u8, back),
                    Some(Piece::new(*piece_type, side)),
                );
            }
            for x in CANNON_FILES {
                self.set(
                    Position::new_unchecked(x, cannon),
                    Some(Piece::new(PieceType::Cannon, side)),
                );
            }
            for x in SOLDIER_FILES {
                self.set(
                    Position::new_unchecked(x, soldier),
                    Some(Piece::new(PieceType::Soldier, side)),
                );
            }
        }
    }

    /// 获取指定位置的棋子，越界返回 None
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子，越界时忽略
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 查找指定阵营的将/帅位置
    pub fn find_king(&self, side: Side) -> Option<Position> {
        self.occupied()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.side == side)
            .map(|(pos, _)| pos)
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        self.occupied().filter(|(_, piece)| piece.side == side).collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        self.occupied().collect()
    }

    /// 按行优先顺序遍历所有有子的格子
    fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, sq)| {
            let piece = (*sq)?;
            Position::from_index(index).map(|pos| (pos, piece))
        })
    }

    /// 统计同一直线上两点之间（不含端点）的棋子数
    ///
    /// 两点不在同一行或同一列时返回 None。
    pub fn count_between(&self, from: Position, to: Position) -> Option<usize> {
        if from == to || (from.x != to.x && from.y != to.y) {
            return None;
        }

        let count = if from.x == to.x {
            let (min_y, max_y) = (from.y.min(to.y), from.y.max(to.y));
            ((min_y + 1)..max_y)
                .filter(|&y| self.get(Position::new_unchecked(from.x, y)).is_some())
                .count()
        } else {
            let (min_x, max_x) = (from.x.min(to.x), from.x.max(to.x));
            ((min_x + 1)..max_x)
                .filter(|&x| self.get(Position::new_unchecked(x, from.y)).is_some())
                .count()
        };
        Some(count)
    }

    /// 检查两个将是否面对面（飞将）
    ///
    /// 同列或同行且中间无子即视为照面。
    pub fn kings_facing(&self) -> bool {
        match (self.find_king(Side::Red), self.find_king(Side::Black)) {
            (Some(red_pos), Some(black_pos)) => {
                self.count_between(red_pos, black_pos) == Some(0)
            }
            _ => false,
        }
    }

    /// 统计指定棋子的数量
    pub fn count(&self, piece: Piece) -> usize {
        self.occupied().filter(|(_, p)| *p == piece).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
