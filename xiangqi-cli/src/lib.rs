//! 中国象棋命令行前端
//!
//! 包含:
//! - 配置加载与保存
//! - 命令解析
//! - 控制台棋盘渲染
//! - 命令循环

pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::{Command, CommandError};
pub use config::CliConfig;
pub use render::{render_board, render_status, RenderOptions};
pub use session::{Flow, Session};
