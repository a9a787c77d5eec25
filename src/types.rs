//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 主机属性映射，键按字典序排列
pub type Attributes = BTreeMap<String, AttrValue>;

/// 源目录描述：名称作为 `source` 属性写入 genders 文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDir {
    pub name: String,
    pub path: PathBuf,
}

impl SourceDir {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// 属性值
///
/// 主机文件中的标量保持原生类型，直到渲染时才转成字符串。
/// `Null` 来自未匹配的可选捕获组或 YAML 中的 `~`，渲染为 `None`；
/// 布尔值渲染为 `True` / `False`，与既有 genders 文件保持一致。
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// 序列或映射，保存其紧凑 JSON 表示
    Nested(String),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("None"),
            AttrValue::Bool(true) => f.write_str("True"),
            AttrValue::Bool(false) => f.write_str("False"),
            AttrValue::Int(i) => write!(f, "{}", i),
            // serde_yaml 的数字格式保留 `1.0` 这类小数点
            AttrValue::Float(x) => write!(f, "{}", serde_yaml::Number::from(*x)),
            AttrValue::Str(s) | AttrValue::Nested(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<Option<&str>> for AttrValue {
    fn from(s: Option<&str>) -> Self {
        s.map_or(AttrValue::Null, AttrValue::from)
    }
}

impl From<serde_yaml::Value> for AttrValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttrValue::Int(i)
                } else if let Some(x) = n.as_f64().filter(|_| n.is_f64()) {
                    AttrValue::Float(x)
                } else {
                    // 超出 i64 范围的无符号整数
                    AttrValue::Str(n.to_string())
                }
            }
            Value::String(s) => AttrValue::Str(s),
            Value::Tagged(tagged) => AttrValue::from(tagged.value),
            nested @ (Value::Sequence(_) | Value::Mapping(_)) => AttrValue::Nested(
                serde_json::to_string(&nested).unwrap_or_else(|_| format!("{:?}", nested)),
            ),
        }
    }
}

/// genders 文件中的一行：主机名 + 属性（已包含 `source`）
#[derive(Debug, Clone, PartialEq)]
pub struct GendersEntry {
    hostname: String,
    attributes: Attributes,
}

impl GendersEntry {
    pub fn new(hostname: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            hostname: hostname.into(),
            attributes,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl fmt::Display for GendersEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::attr_merge::render_line(
            &self.hostname,
            &self.attributes,
        ))
    }
}

/// 日志级别 (DEBUG / INFO / WARNING / CRITICAL)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Debug,
    Info,
    #[default]
    Warning,
    Critical,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Debug => write!(f, "DEBUG"),
            Verbosity::Info => write!(f, "INFO"),
            Verbosity::Warning => write!(f, "WARNING"),
            Verbosity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Verbosity::Debug),
            "INFO" => Ok(Verbosity::Info),
            "WARNING" | "WARN" => Ok(Verbosity::Warning),
            "CRITICAL" => Ok(Verbosity::Critical),
            other => Err(format!(
                "无效的日志级别 '{}'，可选: DEBUG, INFO, WARNING, CRITICAL",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Verbosity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
