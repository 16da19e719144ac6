//! 控制台对局会话
//!
//! 读取一行命令、调用引擎、输出结果。会话独占一个 [`GameState`]。

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use xiangqi::{Fen, GameState, Move, MoveOutcome, Notation};

use crate::command::{Command, HELP};
use crate::config::CliConfig;
use crate::render::{render_board, render_status, RenderOptions};

/// 处理命令后是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 对局会话
pub struct Session {
    state: GameState,
    config: CliConfig,
    /// `save` 命令写入的配置文件
    config_path: Option<PathBuf>,
}

impl Session {
    /// 创建会话，配置了 `start_fen` 时从该局面开始
    pub fn new(config: CliConfig) -> Result<Self> {
        let state = match &config.start_fen {
            Some(fen) => Fen::parse(fen).with_context(|| format!("无效的开局 FEN: {}", fen))?,
            None => GameState::new(),
        };
        Ok(Self {
            state,
            config,
            config_path: CliConfig::config_path(),
        })
    }

    /// 指定 `save` 命令使用的配置文件路径
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// 当前配置
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// 当前对局
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 棋盘与状态栏
    pub fn render(&self) -> String {
        let snapshot = self.state.snapshot();
        let options = RenderOptions {
            use_color: self.config.use_color,
            flip_board: self.config.flip_board,
        };
        format!(
            "{}\n{}",
            render_board(&snapshot, options),
            render_status(&snapshot)
        )
    }

    /// 处理一行输入，返回要输出的文本
    pub fn handle_line(&mut self, line: &str) -> (String, Flow) {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return (format!("输入错误: {}", e), Flow::Continue),
        };
        debug!(?command, "收到命令");

        let reply = match command {
            Command::Move { from, to } => {
                // 表示法要在走棋前的局面上计算
                let notation = Notation::to_chinese(self.state.board(), &Move::new(from, to));
                match self.state.attempt_move(from, to) {
                    Ok(outcome) => self.describe_outcome(&outcome, notation),
                    Err(e) => format!("无效的移动: {}", e),
                }
            }
            Command::Undo => match self.state.undo_last_move() {
                Ok(()) => "已悔棋一步".to_string(),
                Err(e) => format!("无法悔棋: {}", e),
            },
            Command::Moves => {
                let moves = self.state.legal_moves();
                if moves.is_empty() {
                    "没有合法走法".to_string()
                } else {
                    moves
                        .iter()
                        .map(|mv| {
                            let chinese = Notation::to_chinese(self.state.board(), mv)
                                .unwrap_or_default();
                            format!("{} {}", mv.to_iccs(), chinese)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::History => {
                let notations = Notation::for_history(&self.state);
                if notations.is_empty() {
                    "尚无走法".to_string()
                } else {
                    self.state
                        .history()
                        .iter()
                        .zip(notations)
                        .enumerate()
                        .map(|(i, (entry, chinese))| {
                            format!("{}. {} {}", i + 1, entry.mv.to_iccs(), chinese)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Fen => Fen::to_string(&self.state),
            Command::Flip => {
                self.config.flip_board = !self.config.flip_board;
                "已翻转棋盘".to_string()
            }
            Command::Color => {
                self.config.use_color = !self.config.use_color;
                if self.config.use_color {
                    "已开启颜色".to_string()
                } else {
                    "已关闭颜色".to_string()
                }
            }
            Command::Save => self.save_config(),
            Command::Help => HELP.to_string(),
            Command::Quit => return ("再见".to_string(), Flow::Quit),
        };

        (reply, Flow::Continue)
    }

    fn save_config(&self) -> String {
        let Some(path) = &self.config_path else {
            return "无法获取配置目录".to_string();
        };
        match self.config.save_to(path) {
            Ok(()) => format!("设置已保存: {}", path.display()),
            Err(e) => format!("保存设置失败: {:#}", e),
        }
    }

    fn describe_outcome(&self, outcome: &MoveOutcome, notation: Option<String>) -> String {
        let mut text = format!("走棋: {}", outcome.mv.to_iccs());
        if self.config.show_notation {
            if let Some(notation) = notation {
                text.push_str(&format!(" ({})", notation));
            }
        }
        if let Some(captured) = outcome.captured {
            text.push_str(&format!("，吃{}", captured.display_char()));
        }
        text
    }

    /// 命令循环，直到退出或输入结束
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", HELP)?;

        let mut lines = input.lines();
        loop {
            writeln!(output, "{}", self.render())?;
            if self.state.status().is_over() {
                writeln!(output, "游戏结束！可以 undo 悔棋或 quit 退出")?;
            }
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let (reply, flow) = self.handle_line(&line.context("读取输入失败")?);
            writeln!(output, "{}", reply)?;
            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiangqi::{GameStatus, Side};

    fn session() -> Session {
        let config = CliConfig {
            use_color: false,
            ..CliConfig::default()
        };
        Session::new(config).unwrap()
    }

    #[test]
    fn test_move_and_undo() {
        let mut session = session();

        let (reply, flow) = session.handle_line("h2e2");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(reply, "走棋: h2e2 (炮二平五)");
        assert_eq!(session.state().turn(), Side::Black);

        let (reply, _) = session.handle_line("undo");
        assert_eq!(reply, "已悔棋一步");
        assert_eq!(session.state(), &GameState::new());

        let (reply, _) = session.handle_line("undo");
        assert!(reply.starts_with("无法悔棋"));
    }

    #[test]
    fn test_capture_reply() {
        let mut session = session();
        let (reply, _) = session.handle_line("b2b9");
        assert_eq!(reply, "走棋: b2b9 (炮八進七)，吃馬");
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let mut session = session();

        let (reply, _) = session.handle_line("a3b3");
        assert!(reply.starts_with("无效的移动"));
        let (reply, _) = session.handle_line("a6a5");
        assert!(reply.starts_with("无效的移动"));
        let (reply, _) = session.handle_line("nonsense");
        assert!(reply.starts_with("输入错误"));

        assert_eq!(session.state(), &GameState::new());
    }

    #[test]
    fn test_moves_history_fen() {
        let mut session = session();

        let (reply, _) = session.handle_line("moves");
        assert_eq!(reply.lines().count(), 44);
        assert!(reply.contains("h2e2 炮二平五"));

        session.handle_line("h2e2");
        session.handle_line("h9g7");
        let (reply, _) = session.handle_line("history");
        assert_eq!(reply, "1. h2e2 炮二平五\n2. h9g7 馬8進7");

        let (reply, _) = session.handle_line("fen");
        assert_eq!(reply, "rnbakab1r/9/1c4nc1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR r 0 2");
    }

    #[test]
    fn test_start_fen_and_checkmate() {
        let config = CliConfig {
            use_color: false,
            start_fen: Some("4k4/R8/9/9/8R/9/9/9/9/3K5 r".to_string()),
            ..CliConfig::default()
        };
        let mut session = Session::new(config).unwrap();

        session.handle_line("i5i9");
        assert_eq!(session.state().status(), GameStatus::Checkmate(Side::Black));
        let (reply, _) = session.handle_line("e9e8");
        assert!(reply.contains("Game is already over"));
    }

    #[test]
    fn test_invalid_start_fen() {
        let config = CliConfig {
            start_fen: Some("bogus".to_string()),
            ..CliConfig::default()
        };
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn test_display_settings_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xiangqi").join("config.json");
        let mut session = session().with_config_path(path.clone());

        let (reply, _) = session.handle_line("flip");
        assert_eq!(reply, "已翻转棋盘");
        assert!(session.config().flip_board);
        // 黑方底线显示在最下方
        assert!(session.render().lines().nth(1).unwrap().starts_with("0 俥"));

        let (reply, _) = session.handle_line("color");
        assert_eq!(reply, "已开启颜色");
        assert!(session.render().contains('\x1b'));

        let (reply, _) = session.handle_line("save");
        assert!(reply.starts_with("设置已保存"));
        assert_eq!(CliConfig::load_from(&path), *session.config());
        // 设置命令不影响对局
        assert_eq!(session.state(), &GameState::new());
    }

    #[test]
    fn test_save_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        // 父路径是文件，无法创建目录
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut session = session().with_config_path(blocker.join("config.json"));

        let (reply, flow) = session.handle_line("save");
        assert!(reply.starts_with("保存设置失败"));
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_run_loop() {
        let mut session = session();
        let input = b"h2e2\nquit\nh9g7\n";
        let mut output = Vec::new();

        session.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("走棋: h2e2"));
        assert!(text.contains("再见"));
        // quit 之后的输入不再处理
        assert_eq!(session.state().history().len(), 1);
    }
}
