//! # Contributor 命令行驱动
//!
//! 读取 JSON 声明索引，按轮次执行贡献处理并写出生成的 Java 源码。
//! 每个 `--index` 文件对应一轮处理。

use anyhow::Context;
use clap::Parser;
use contributor_abstractions::{CollectingMessager, DeclarationIndex, DiagnosticKind};
use contributor_common::ProcessorConfig;
use contributor_compiler::{ContributorProcessor, DirectoryFiler, Filer, MemoryFiler};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 默认输出目录
const DEFAULT_OUTPUT_DIR: &str = "generated";

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "contributor")]
#[command(about = "从声明索引生成注入器贡献模块", version)]
struct Args {
    /// 配置文件路径（toml、json、yaml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 声明索引文件，每个文件处理一轮
    #[arg(short, long = "index", required_unless_present = "print_config")]
    indexes: Vec<PathBuf>,

    /// 输出目录，覆盖配置中的 output_dir
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// 日志级别，设置了 RUST_LOG 时以 RUST_LOG 为准
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 只执行处理，不写出文件
    #[arg(long)]
    dry_run: bool,

    /// 打印生效的配置后退出
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("处理失败: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// 初始化日志
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// 执行全部轮次，没有错误级别的诊断时返回 `true`
fn run(args: &Args) -> anyhow::Result<bool> {
    let mut config = ProcessorConfig::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(out) = &args.out {
        config.output_dir = Some(out.clone());
    }

    if args.print_config {
        println!("{}", toml::to_string_pretty(&config).context("配置序列化失败")?);
        return Ok(true);
    }

    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let mut filer: Box<dyn Filer> = if args.dry_run {
        info!("dry-run 模式，不写出文件");
        Box::new(MemoryFiler::new())
    } else {
        info!("输出目录: {}", output_dir.display());
        Box::new(DirectoryFiler::new(output_dir))
    };

    let mut processor = ContributorProcessor::new(config);
    let mut messager = CollectingMessager::new();
    let mut error_count = 0;

    for path in &args.indexes {
        let index = DeclarationIndex::from_path(path)
            .with_context(|| format!("加载声明索引失败: {}", path.display()))?;

        let outcome = processor.process_round(&index, filer.as_mut(), &mut messager);

        // 诊断信息已由报告器写入日志，这里只统计错误
        error_count += messager
            .take()
            .iter()
            .filter(|diagnostic| diagnostic.kind == DiagnosticKind::Error)
            .count();
        for name in &outcome.generated {
            println!("{name}");
        }
    }

    if error_count > 0 {
        error!("处理完成，共 {} 个错误", error_count);
    }
    Ok(error_count == 0)
}
