//! 主机名属性解析 (按域后缀选择正则，命名捕获组即属性)

use crate::error::{GendersError, Result};
use crate::types::{AttrValue, Attributes};
use crate::utils::logger::Logger;
use regex::Regex;

/// 单个域配置
#[derive(Debug, Clone)]
struct DomainPattern {
    suffix: String,
    /// 用户给出的原始表达式，用于告警信息
    source: String,
    /// 锚定到主机名开头的编译结果
    regex: Regex,
}

/// 域后缀 → 正则表达式
///
/// 匹配顺序固定：后缀越长越优先，长度相同时按字典序。
#[derive(Debug, Clone, Default)]
pub struct DomainPatterns {
    patterns: Vec<DomainPattern>,
}

impl DomainPatterns {
    /// 编译全部表达式，任一无效即返回配置错误
    pub fn new<I, K, V>(config: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut patterns = Vec::new();

        for (suffix, source) in config {
            let suffix = suffix.into();
            let source = source.into();
            // 只锚定开头：表达式不必覆盖整个主机名
            let regex = Regex::new(&format!("^(?:{})", source)).map_err(|e| {
                GendersError::Regex {
                    domain: suffix.clone(),
                    source: e,
                }
            })?;
            patterns.push(DomainPattern {
                suffix,
                source,
                regex,
            });
        }

        patterns.sort_by(|a, b| {
            b.suffix
                .len()
                .cmp(&a.suffix.len())
                .then_with(|| a.suffix.cmp(&b.suffix))
        });
        patterns.dedup_by(|later, earlier| later.suffix == earlier.suffix);

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 按匹配顺序列出已配置的域后缀
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.suffix.as_str())
    }

    /// 解析主机名
    ///
    /// 没有匹配的域或正则不匹配时记录告警并返回空映射。
    /// 未参与匹配的可选捕获组保留为 `AttrValue::Null`。
    pub fn attributes_for(&self, hostname: &str, logger: &dyn Logger) -> Attributes {
        let Some(pattern) = self.patterns.iter().find(|p| hostname.ends_with(&p.suffix)) else {
            logger.warning(&format!(
                "无法从主机名 '{}' 解析属性: 没有匹配的域配置",
                hostname
            ));
            return Attributes::new();
        };

        let Some(captures) = pattern.regex.captures(hostname) else {
            logger.warning(&format!(
                "主机名 '{}' 不匹配正则表达式 '{}'",
                hostname, pattern.source
            ));
            return Attributes::new();
        };

        pattern
            .regex
            .capture_names()
            .flatten()
            .map(|name| {
                let value = captures.name(name).map(|m| m.as_str());
                (name.to_string(), AttrValue::from(value))
            })
            .collect()
    }
}
