//! 命令解析

use std::str::FromStr;

use thiserror::Error;
use xiangqi::{ChessError, Position};

/// 用户命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 走棋，如 `h2e2`
    Move { from: Position, to: Position },
    /// 悔棋
    Undo,
    /// 列出合法走法
    Moves,
    /// 列出历史走法
    History,
    /// 显示当前 FEN
    Fen,
    /// 翻转棋盘
    Flip,
    /// 切换颜色显示
    Color,
    /// 保存当前显示设置
    Save,
    /// 帮助
    Help,
    /// 退出
    Quit,
}

/// 命令解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// 空输入
    #[error("Empty command")]
    Empty,

    /// 无法识别的命令
    #[error("Unknown command: {0:?} (type 'help' for usage)")]
    Unknown(String),

    /// 坐标无效
    #[error(transparent)]
    Square(#[from] ChessError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();

        match input.as_str() {
            "" => Err(CommandError::Empty),
            "undo" | "u" => Ok(Command::Undo),
            "moves" | "m" => Ok(Command::Moves),
            "history" | "h" => Ok(Command::History),
            "fen" => Ok(Command::Fen),
            "flip" => Ok(Command::Flip),
            "color" => Ok(Command::Color),
            "save" => Ok(Command::Save),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            text => parse_move(text),
        }
    }
}

/// 解析走法：`h2e2`、`h2-e2` 或 `h2 e2`
fn parse_move(text: &str) -> Result<Command, CommandError> {
    let squares: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if squares.len() != 4 || !squares.is_ascii() {
        return Err(CommandError::Unknown(text.to_string()));
    }

    let from = Position::parse_iccs(&squares[..2])?;
    let to = Position::parse_iccs(&squares[2..])?;
    Ok(Command::Move { from, to })
}

/// 帮助文本
pub const HELP: &str = "\
命令:
  h2e2 / h2-e2   走棋（列 a-i，行 0-9，红方底线为 0）
  undo           悔棋
  moves          列出当前合法走法
  history        列出历史走法
  fen            显示当前局面 FEN
  flip           翻转棋盘
  color          切换颜色显示
  save           保存显示设置
  help           显示帮助
  quit           退出";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        assert_eq!("undo".parse::<Command>(), Ok(Command::Undo));
        assert_eq!(" MOVES ".parse::<Command>(), Ok(Command::Moves));
        assert_eq!("history".parse::<Command>(), Ok(Command::History));
        assert_eq!("fen".parse::<Command>(), Ok(Command::Fen));
        assert_eq!("flip".parse::<Command>(), Ok(Command::Flip));
        assert_eq!("Color".parse::<Command>(), Ok(Command::Color));
        assert_eq!("save".parse::<Command>(), Ok(Command::Save));
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_move() {
        let expected = Command::Move {
            from: Position::new_unchecked(7, 2),
            to: Position::new_unchecked(4, 2),
        };
        assert_eq!("h2e2".parse::<Command>(), Ok(expected));
        assert_eq!("h2-e2".parse::<Command>(), Ok(expected));
        assert_eq!("H2 E2".parse::<Command>(), Ok(expected));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert!(matches!(
            "jumping".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            "j2e2".parse::<Command>(),
            Err(CommandError::Square(ChessError::InvalidSquare { .. }))
        ));
        assert!(matches!(
            "炮二平五".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }
}
