//! genders-gen 主程序入口
//!
//! 入口只负责：解析参数 → 合并配置 → 初始化日志 → 生成文件。
//! 失败时报告错误并以状态码 1 退出。

use clap::Parser;
use genders_gen::cli::Cli;
use genders_gen::config::{FileConfig, GeneratorConfig};
use genders_gen::utils::logger::{self, TracingLogger};
use genders_gen::{GendersGenerator, Result};
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        e.report(cli.verbose);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file_config = cli.config.as_deref().map(FileConfig::load).transpose()?;
    let config = GeneratorConfig::resolve(cli.overrides(), file_config)?;

    logger::init_tracing(config.verbosity);

    let generator = GendersGenerator::new(config, Arc::new(TracingLogger))?;
    generator.generate()
}
