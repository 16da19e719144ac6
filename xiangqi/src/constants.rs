//! 棋盘常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 10;

/// 格子总数
pub const BOARD_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 红方最后一行（河界以下）
pub const RED_RIVER_RANK: u8 = 4;

/// 黑方最后一行（河界以上）
pub const BLACK_RIVER_RANK: u8 = 5;

/// 九宫格列范围
pub const PALACE_FILES: std::ops::RangeInclusive<u8> = 3..=5;

/// 红方九宫格行范围
pub const RED_PALACE_RANKS: std::ops::RangeInclusive<u8> = 0..=2;

/// 黑方九宫格行范围
pub const BLACK_PALACE_RANKS: std::ops::RangeInclusive<u8> = 7..=9;
