//! 错误处理模块 (修复原则：明确抛出异常)
//!
//! 单个主机的问题只通过日志告警，不会变成错误；
//! 这里的错误都是整次运行失败。

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

/// 运行级错误
#[derive(Error, Debug)]
pub enum GendersError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("无法读取配置文件 {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件 {} 解析失败: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("域 '{domain}' 的正则表达式无效")]
    Regex {
        domain: String,
        #[source]
        source: regex::Error,
    },

    #[error("无法写入 genders 文件 {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GendersError {
    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息
    pub fn report(&self, verbose: bool) {
        if !verbose {
            match self.source() {
                Some(source) => eprintln!("错误: {}: {}", self, source),
                None => eprintln!("错误: {}", self),
            }
            return;
        }

        // 详细模式：打印完整错误链
        eprintln!("错误: {}", self);
        let mut current = self.source();
        while let Some(next) = current {
            eprintln!("  └─ 原因: {}", next);
            current = next.source();
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, GendersError>;
