//! 日志能力 (注入式，无全局可变状态)
//!
//! 各组件持有 `Arc<dyn Logger>`，生产环境转发到 `tracing`，
//! 测试中用 `MemoryLogger` 记录消息以便断言。

use crate::types::Verbosity;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;

/// 分级日志接口
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn critical(&self, message: &str);
}

/// 转发到 tracing 宏
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn critical(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Warning => LevelFilter::WARN,
            Verbosity::Critical => LevelFilter::ERROR,
        }
    }
}

/// 安装 stderr 上的 fmt subscriber
///
/// 输出只含级别和消息，不带时间戳和 target。
/// `GENDERS_LOG` 环境变量存在时覆盖 verbosity。
pub fn init_tracing(verbosity: Verbosity) {
    use std::io::IsTerminal;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GENDERS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(LevelFilter::from(verbosity).to_string()));

    // 重复初始化（如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

/// 在内存中记录日志，供测试和调用方检查
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(Verbosity, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Verbosity, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }

    /// 全部记录
    pub fn records(&self) -> Vec<(Verbosity, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// 指定级别的消息
    pub fn messages(&self, level: Verbosity) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Verbosity::Warning)
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(Verbosity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(Verbosity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(Verbosity::Warning, message);
    }

    fn critical(&self, message: &str) {
        self.push(Verbosity::Critical, message);
    }
}
