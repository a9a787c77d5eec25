//! hiera 主机文件加载 (YAML 键值数据)

use crate::types::{AttrValue, Attributes};
use crate::utils::logger::Logger;
use serde_yaml::Value;
use std::path::Path;

/// 读取主机文件的顶层映射
///
/// 先展开 YAML 合并键 (`<<`)。文件缺失、无法解析、合并键无效或
/// 顶层不是映射时记录告警并返回空映射；空文档视为没有属性。
pub fn load_host_file(path: &Path, logger: &dyn Logger) -> Attributes {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            logger.warning(&format!("无法读取主机文件 '{}': {}", path.display(), e));
            return Attributes::new();
        }
    };

    let mut document: Value = match serde_yaml::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            logger.warning(&format!(
                "主机文件 '{}' 不是有效的 YAML 文件: {}",
                path.display(),
                e
            ));
            return Attributes::new();
        }
    };

    // hiera 数据常用 `<<: *anchor` 合并键
    if let Err(e) = document.apply_merge() {
        logger.warning(&format!(
            "主机文件 '{}' 的合并键无效: {}",
            path.display(),
            e
        ));
        return Attributes::new();
    }

    match document {
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| (key_to_string(key), AttrValue::from(value)))
            .collect(),
        Value::Null => {
            logger.debug(&format!("主机文件 '{}' 为空", path.display()));
            Attributes::new()
        }
        _ => {
            logger.warning(&format!(
                "主机文件 '{}' 的顶层不是键值映射",
                path.display()
            ));
            Attributes::new()
        }
    }
}

/// YAML 键允许非字符串，统一转为字符串
fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => AttrValue::from(other).to_string(),
    }
}
