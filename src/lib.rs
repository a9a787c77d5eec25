//! genders-gen - 从 hiera 主机文件生成 genders 文件
//!
//! 每个输入目录中的 `<hostname>.yaml` 对应一台主机，
//! 主机名按域配置的正则拆分为属性，再与主机文件内容合并。

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

// 重新导出常用类型
pub use crate::config::GeneratorConfig;
pub use crate::core::GendersGenerator;
pub use error::{GendersError, Result};
pub use types::{AttrValue, Attributes, GendersEntry, SourceDir, Verbosity};
pub use utils::logger::{Logger, MemoryLogger, TracingLogger};
