use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xiangqi_cli::{CliConfig, Session};

fn main() -> Result<()> {
    let config = CliConfig::load();

    // 初始化日志，RUST_LOG 优先于配置
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!(?config, "使用配置");
    info!("中国象棋启动");

    let mut session = Session::new(config)?;
    let stdin = std::io::stdin();
    session.run(stdin.lock(), std::io::stdout())?;

    info!("中国象棋退出");
    Ok(())
}
