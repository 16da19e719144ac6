//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLACK_PALACE_RANKS, BLACK_RIVER_RANK, BOARD_HEIGHT, BOARD_WIDTH, PALACE_FILES,
    RED_PALACE_RANKS, RED_RIVER_RANK,
};
use crate::error::ChessError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 将/帅
    King,
    /// 士/仕
    Advisor,
    /// 象/相
    Bishop,
    /// 马/傌
    Knight,
    /// 车/俥
    Rook,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceType {
    /// 全部七种棋子
    pub const ALL: [PieceType; 7] = [
        PieceType::King,
        PieceType::Advisor,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Cannon,
        PieceType::Soldier,
    ];

    /// 获取 FEN 字符（红方大写，黑方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceType::King => 'k',
            PieceType::Advisor => 'a',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Cannon => 'c',
            PieceType::Soldier => 'p',
        };
        match side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceType, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'k' => PieceType::King,
            'a' => PieceType::Advisor,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'r' => PieceType::Rook,
            'c' => PieceType::Cannon,
            'p' => PieceType::Soldier,
            _ => return None,
        };
        Some((piece_type, side))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（先手，在下方）
    Red,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 前进方向（行号增量）
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// 中文名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Side::Red => "红方",
            Side::Black => "黑方",
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }

    /// 从 FEN 字符解析（`w` 视为红方）
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'r' | 'R' | 'w' | 'W' => Some(Side::Red),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }
}

/// 棋子
///
/// 创建后不可变；走棋只改变它所在的格子。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub const fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// 获取棋子显示的汉字
    pub fn display_char(&self) -> char {
        match (self.piece_type, self.side) {
            (PieceType::King, Side::Red) => '帥',
            (PieceType::King, Side::Black) => '將',
            (PieceType::Advisor, Side::Red) => '仕',
            (PieceType::Advisor, Side::Black) => '士',
            (PieceType::Bishop, Side::Red) => '相',
            (PieceType::Bishop, Side::Black) => '象',
            (PieceType::Knight, Side::Red) => '傌',
            (PieceType::Knight, Side::Black) => '馬',
            (PieceType::Rook, Side::Red) => '俥',
            (PieceType::Rook, Side::Black) => '車',
            (PieceType::Cannon, Side::Red) => '炮',
            (PieceType::Cannon, Side::Black) => '砲',
            (PieceType::Soldier, Side::Red) => '兵',
            (PieceType::Soldier, Side::Black) => '卒',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.piece_type.to_fen_char(self.side)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceType::from_fen_char(c).map(|(piece_type, side)| Piece { piece_type, side })
    }
}

/// 棋盘位置
///
/// `x` 为列（0-8，从左到右），`y` 为行（0-9，从红方底线到黑方底线）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-8)
    pub x: u8,
    /// 行 (0-9)
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.x as usize) < BOARD_WIDTH && (self.y as usize) < BOARD_HEIGHT
    }

    /// 检查位置是否在指定阵营的半场（未过河）
    pub fn is_own_half(&self, side: Side) -> bool {
        match side {
            Side::Red => self.y <= RED_RIVER_RANK,
            Side::Black => self.y >= BLACK_RIVER_RANK,
        }
    }

    /// 对指定阵营而言是否已过河
    pub fn has_crossed_river(&self, side: Side) -> bool {
        !self.is_own_half(side)
    }

    /// 检查位置是否在九宫格内
    pub fn is_in_palace(&self, side: Side) -> bool {
        let in_x = PALACE_FILES.contains(&self.x);
        let in_y = match side {
            Side::Red => RED_PALACE_RANKS.contains(&self.y),
            Side::Black => BLACK_PALACE_RANKS.contains(&self.y),
        };
        in_x && in_y
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Position::new(x, y)
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * BOARD_WIDTH + self.x as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_WIDTH * BOARD_HEIGHT {
            Some(Position {
                x: (index % BOARD_WIDTH) as u8,
                y: (index / BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 解析 ICCS 坐标（列 a-i，行 0-9），如 `"h2"`
    pub fn parse_iccs(text: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidSquare {
            text: text.to_string(),
        };
        let mut chars = text.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='i').contains(&file) {
            return Err(invalid());
        }
        let rank = rank.to_digit(10).ok_or_else(invalid)?;
        Position::new(file as u8 - b'a', rank as u8).ok_or_else(invalid)
    }

    /// 转换为 ICCS 坐标
    pub fn to_iccs(&self) -> String {
        format!("{}{}", (b'a' + self.x) as char, self.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
