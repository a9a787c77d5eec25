//! CLI 参数定义

use crate::config::CliOverrides;
use crate::types::Verbosity;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// genders-gen - 从 hiera 主机文件生成 genders 文件
#[derive(Parser, Debug)]
#[command(
    name = "genders-gen",
    version,
    about = "从 hiera 主机文件生成 genders 文件",
    long_about = "遍历输入目录中的 <hostname>.yaml 主机文件，按域配置的正则把主机名拆分为属性，\
                  与主机文件内容合并后写入 genders 文件（会被完整覆盖）"
)]
pub struct Cli {
    /// 写入的 genders 文件 (默认 /etc/genders)
    #[arg(short, long, value_name = "FILE")]
    pub gendersfile: Option<PathBuf>,

    /// hiera 主机文件目录，可重复；NAME 作为 source 属性写入
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["NAME", "DIRECTORY"],
        action = ArgAction::Append
    )]
    pub input: Vec<String>,

    /// 域配置，可重复；匹配该后缀的主机名按 REGEX 拆分，命名捕获组即属性
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["DOMAIN", "REGEX"],
        action = ArgAction::Append
    )]
    pub domain: Vec<String>,

    /// YAML 或 TOML 配置文件 (gendersfile, input, domain, verbosity)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 详细输出 (DEBUG)
    #[arg(short, long, conflicts_with = "silent")]
    pub verbose: bool,

    /// 只输出错误 (CRITICAL)
    #[arg(short, long)]
    pub silent: bool,
}

impl Cli {
    /// 命令行指定的日志级别
    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.verbose {
            Some(Verbosity::Debug)
        } else if self.silent {
            Some(Verbosity::Critical)
        } else {
            None
        }
    }

    /// 转换为配置覆盖项
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            gendersfile: self.gendersfile.clone(),
            input: pairs(&self.input)
                .map(|(name, dir)| (name, PathBuf::from(dir)))
                .collect(),
            domain: pairs(&self.domain).collect(),
            verbosity: self.verbosity(),
        }
    }
}

/// 把成对出现的参数值还原为 (key, value)
fn pairs(values: &[String]) -> impl Iterator<Item = (String, String)> + '_ {
    values
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
}
