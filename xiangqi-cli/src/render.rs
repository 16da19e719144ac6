//! 控制台棋盘渲染

use xiangqi::{GameStatus, Piece, Side, Snapshot, BOARD_HEIGHT, BOARD_WIDTH};

const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// 空交叉点（全角，与汉字等宽）
const EMPTY: char = '＋';

/// 渲染选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// 使用 ANSI 颜色（红方红色，黑方蓝色）
    pub use_color: bool,
    /// 黑方在下
    pub flip_board: bool,
}

/// 渲染棋盘
pub fn render_board(snapshot: &Snapshot, options: RenderOptions) -> String {
    let mut grid = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    for (pos, piece) in snapshot {
        grid[pos.y as usize][pos.x as usize] = Some(piece);
    }

    let (ranks, files): (Vec<usize>, Vec<usize>) = if options.flip_board {
        ((0..BOARD_HEIGHT).collect(), (0..BOARD_WIDTH).rev().collect())
    } else {
        ((0..BOARD_HEIGHT).rev().collect(), (0..BOARD_WIDTH).collect())
    };

    let header: String = files
        .iter()
        .map(|&x| format!(" {} ", (b'a' + x as u8) as char))
        .collect();

    let mut lines = Vec::with_capacity(BOARD_HEIGHT + 3);
    lines.push(format!("  {}", header));

    for (row, &y) in ranks.iter().enumerate() {
        // 河界在第 5 行之后
        if row == 5 {
            lines.push(format!("  {:^25}", "楚 河    漢 界"));
        }

        let mut line = format!("{} ", y);
        for &x in &files {
            line.push_str(&render_square(grid[y][x], options.use_color));
            line.push(' ');
        }
        line.push_str(&y.to_string());
        lines.push(line);
    }

    lines.push(format!("  {}", header));
    lines.join("\n")
}

/// 渲染单个交叉点
fn render_square(piece: Option<Piece>, use_color: bool) -> String {
    match piece {
        Some(piece) if use_color => {
            let color = match piece.side {
                Side::Red => RED,
                Side::Black => BLUE,
            };
            format!("{}{}{}", color, piece.display_char(), RESET)
        }
        Some(piece) => piece.display_char().to_string(),
        None => EMPTY.to_string(),
    }
}

/// 状态栏文本
pub fn render_status(snapshot: &Snapshot) -> String {
    let turn = format!("当前回合: {}", snapshot.turn.display_name());
    match snapshot.status {
        GameStatus::InProgress => turn,
        GameStatus::Check(side) => format!("{}  {}被将军！", turn, side.display_name()),
        GameStatus::Checkmate(side) => format!(
            "{}被将死，{}胜",
            side.display_name(),
            side.opponent().display_name()
        ),
        GameStatus::Stalemate(side) => format!(
            "{}被困毙，{}胜",
            side.display_name(),
            side.opponent().display_name()
        ),
    }
}
