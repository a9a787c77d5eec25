//! 属性合并器
//!
//! 优先级（从低到高）：
//! 1. 主机名解析出的属性
//! 2. 主机文件中的属性
//! 3. `source` 标签（最高，总是覆盖）

use crate::types::{AttrValue, Attributes};

/// genders 属性值中不允许出现的字符
const FORBIDDEN_CHARS: [char; 4] = [' ', '#', ',', '='];

/// 合并两组属性，`file_attrs` 在键冲突时胜出
pub fn merge(hostname_attrs: &Attributes, file_attrs: &Attributes) -> Attributes {
    let mut merged = hostname_attrs.clone();
    merged.extend(file_attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// 合并后注入 `source` 标签
pub fn merge_with_source(
    source: &str,
    hostname_attrs: &Attributes,
    file_attrs: &Attributes,
) -> Attributes {
    let mut merged = merge(hostname_attrs, file_attrs);
    merged.insert("source".to_string(), AttrValue::from(source));
    merged
}

/// 把空格、`#`、逗号和 `=` 替换为下划线
pub fn sanitize(value: &str) -> String {
    value.replace(FORBIDDEN_CHARS, "_")
}

/// 单个属性的 genders 表示：`key=value`，值已清洗
pub fn render_pair(key: &str, value: &AttrValue) -> String {
    format!("{}={}", key, sanitize(&value.to_string()))
}

/// 渲染整行：`hostname\tk1=v1,k2=v2`，按完整的 `k=v` 字符串排序
pub fn render_line(hostname: &str, attrs: &Attributes) -> String {
    let mut pairs: Vec<String> = attrs.iter().map(|(k, v)| render_pair(k, v)).collect();
    pairs.sort();
    format!("{}\t{}", hostname, pairs.join(","))
}
