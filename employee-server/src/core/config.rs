use std::path::PathBuf;
use std::str::FromStr;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DB_FILE | ./data/employees.db | SQLite 数据库文件 |
/// | HOST | 0.0.0.0 | 监听地址 |
/// | PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | MAX_LIST_LIMIT | 500 | 列表接口 limit 上限 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DB_FILE=/tmp/employees.db PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub db_file: PathBuf,
    /// 监听地址
    pub host: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 默认日志级别
    pub log_level: String,
    /// 日志目录，未设置时输出到 stdout
    pub log_dir: Option<String>,
    /// `GET /employees` 的 limit 上限
    pub max_list_limit: i64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_file: PathBuf::from("./data/employees.db"),
            host: "0.0.0.0".into(),
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            max_list_limit: 500,
            request_timeout_ms: 30_000,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_file: std::env::var("DB_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_file),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            http_port: parse_env("PORT").unwrap_or(defaults.http_port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            max_list_limit: parse_env("MAX_LIST_LIMIT").unwrap_or(defaults.max_list_limit),
            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    /// 使用自定义数据库路径覆盖配置
    pub fn with_db_file(mut self, db_file: impl Into<PathBuf>) -> Self {
        self.db_file = db_file.into();
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
