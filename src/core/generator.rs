//! genders 文件生成器 (模块原则：发现 → 合并 → 排序 → 写入)

use crate::config::GeneratorConfig;
use crate::core::hostfile::load_host_file;
use crate::core::hostname::DomainPatterns;
use crate::error::{GendersError, Result};
use crate::types::{GendersEntry, SourceDir};
use crate::utils::attr_merge;
use crate::utils::logger::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// hiera 主机文件扩展名
pub const HOST_FILE_SUFFIX: &str = ".yaml";

/// genders 文件生成器
pub struct GendersGenerator {
    input_dirs: Vec<SourceDir>,
    patterns: DomainPatterns,
    gendersfile: PathBuf,
    logger: Arc<dyn Logger>,
}

impl GendersGenerator {
    /// 编译域配置；正则无效时返回错误
    pub fn new(config: GeneratorConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        Ok(Self {
            patterns: DomainPatterns::new(config.domains)?,
            input_dirs: config.input_dirs,
            gendersfile: config.gendersfile,
            logger,
        })
    }

    pub fn gendersfile(&self) -> &Path {
        &self.gendersfile
    }

    /// 列出目录中的主机
    ///
    /// 只看普通文件，名称必须以 `.yaml` 结尾且去掉后缀后非空，不递归。
    /// 目录无法读取时告警并返回空列表；非 UTF-8 的 `.yaml` 文件名告警后跳过。
    pub fn hosts_in_directory(&self, directory: &Path) -> Vec<String> {
        self.logger
            .info(&format!("从 '{}' 读取主机列表", directory.display()));

        let entries = match std::fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                self.logger.warning(&format!(
                    "无法读取目录 '{}': {}",
                    directory.display(),
                    e
                ));
                return Vec::new();
            }
        };

        let mut hosts: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let filename = match entry.file_name().into_string() {
                    Ok(filename) => filename,
                    Err(raw) => {
                        let message = format!("跳过非 UTF-8 文件名 '{}'", raw.to_string_lossy());
                        if raw.as_encoded_bytes().ends_with(HOST_FILE_SUFFIX.as_bytes()) {
                            self.logger.warning(&message);
                        } else {
                            self.logger.debug(&message);
                        }
                        return None;
                    }
                };
                let host = filename.strip_suffix(HOST_FILE_SUFFIX)?;
                (!host.is_empty()).then(|| host.to_string())
            })
            .inspect(|host| self.logger.debug(&format!("发现主机 '{}'", host)))
            .collect();

        hosts.sort();
        hosts
    }

    /// 构建单个主机的条目：主机名属性 < 主机文件属性 < source
    pub fn entry_for_host(&self, source: &SourceDir, hostname: &str) -> GendersEntry {
        let from_hostname = self.patterns.attributes_for(hostname, self.logger.as_ref());
        let host_file = source.path.join(format!("{}{}", hostname, HOST_FILE_SUFFIX));
        let from_file = load_host_file(&host_file, self.logger.as_ref());

        let attributes = attr_merge::merge_with_source(&source.name, &from_hostname, &from_file);
        GendersEntry::new(hostname, attributes)
    }

    /// 所有输入目录的条目，按整行排序
    pub fn entries(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for source in &self.input_dirs {
            self.logger
                .debug(&format!("遍历 '{}' 中的主机", source.path.display()));
            for hostname in self.hosts_in_directory(&source.path) {
                lines.push(self.entry_for_host(source, &hostname).to_string());
            }
        }

        lines.sort();
        lines
    }

    /// genders 文件的完整内容（行间以换行连接，末尾无换行）
    pub fn render(&self) -> String {
        self.entries().join("\n")
    }

    /// 生成并覆盖写入 genders 文件
    ///
    /// 目标是符号链接时写入其指向的文件，已有文件的权限位保持不变。
    /// 写入失败记录为 critical 并返回错误。
    pub fn generate(&self) -> Result<()> {
        self.logger.debug(&format!(
            "写入 genders 文件 '{}'",
            self.gendersfile.display()
        ));

        let content = self.render();

        write_file_atomic(&self.gendersfile, &content).map_err(|e| {
            self.logger.critical(&format!(
                "无法写入 genders 文件 '{}': {}",
                self.gendersfile.display(),
                e
            ));
            GendersError::Write {
                path: self.gendersfile.clone(),
                source: e,
            }
        })
    }
}

/// 先写同目录临时文件再原子替换；父目录必须已存在
///
/// 目标已存在时先解析符号链接，替换链接指向的文件，并沿用其权限位。
fn write_file_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let (target, permissions) = match std::fs::canonicalize(path) {
        Ok(resolved) => {
            let permissions = std::fs::metadata(&resolved)?.permissions();
            (resolved, Some(permissions))
        }
        Err(_) => (path.to_path_buf(), None),
    };

    let mut temp_name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = target.with_file_name(temp_name);

    std::fs::write(&temp_path, content)?;

    let replaced = match permissions {
        Some(permissions) => std::fs::set_permissions(&temp_path, permissions),
        None => Ok(()),
    }
    .and_then(|_| std::fs::rename(&temp_path, &target));

    if let Err(e) = replaced {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
