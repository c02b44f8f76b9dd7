use std::path::PathBuf;

use clap::Parser;
use employee_server::{Config, Server, ServerState, db, init_logger_with_file};

/// Employees CRUD service
#[derive(Debug, Parser)]
#[command(name = "employee-server", version, about)]
struct Cli {
    /// Remove the database file and exit without serving
    #[arg(long)]
    reset: bool,

    /// SQLite database file (overrides DB_FILE)
    #[arg(long, value_name = "PATH")]
    db_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 命令行, 日志)
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.db_file {
        config = config.with_db_file(path);
    }

    init_logger_with_file(&config.log_level, config.log_dir.as_deref());

    if cli.reset {
        let removed = db::remove_database_files(&config.db_file)?;
        tracing::info!(path = %config.db_file.display(), files = removed.len(), "Database removed");
        println!("Database removed.");
        return Ok(());
    }

    tracing::info!("Employee server starting (env: {})", config.environment);

    // 2. 打开数据库 (建表 + 种子数据)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    Server::with_state(config, state).run().await?;

    Ok(())
}
