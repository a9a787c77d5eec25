//! 核心流程：主机发现、主机名解析、主机文件加载、genders 文件生成

pub mod generator;
pub mod hostfile;
pub mod hostname;

pub use generator::{GendersGenerator, HOST_FILE_SUFFIX};
pub use hostfile::load_host_file;
pub use hostname::DomainPatterns;
