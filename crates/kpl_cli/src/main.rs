use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use kpl_diagnostics::{Diagnostic, Emitter};
use kpl_driver::{compile, Compilation};
use kpl_syntax::tokenize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs;

#[derive(Parser)]
#[command(name = "kplc")]
#[command(about = "KPL 编译器前端 - 语法与语义检查", version)]
struct Cli {
    /// 关闭彩色输出
    #[arg(long, global = true)]
    no_color: bool,

    /// 日志详细程度 (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 检查语法和语义错误
    Check {
        /// 输入文件
        input: String,
    },

    /// 分析并打印符号表
    Symbols {
        /// 输入文件
        input: String,
    },

    /// 打印记号流
    Tokens {
        /// 输入文件
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let use_colors = !cli.no_color;
    if !use_colors {
        colored::control::set_override(false);
    }

    let success = match &cli.command {
        Commands::Check { input } => cmd_check(input, use_colors)?,
        Commands::Symbols { input } => cmd_symbols(input, use_colors)?,
        Commands::Tokens { input } => cmd_tokens(input, use_colors)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logger")
}

fn emitter(use_colors: bool) -> Emitter {
    if use_colors {
        Emitter::new()
    } else {
        Emitter::without_colors()
    }
}

fn read_source(input: &str) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("cannot read '{}'", input))
}

/// 编译并输出诊断；失败时返回 None
fn compile_and_report(input: &str, source: &str, use_colors: bool) -> Option<Compilation> {
    match compile(source) {
        Ok(output) => {
            let emitter = emitter(use_colors);
            for warning in &output.warnings {
                emitter.emit_with_source(&warning.clone().with_file(input), source);
            }
            Some(output)
        }
        Err(e) => {
            e.emit(Some(input), Some(source), use_colors);
            None
        }
    }
}

/// 检查命令
fn cmd_check(input: &str, use_colors: bool) -> Result<bool> {
    let source = read_source(input)?;
    log::info!("checking {}", input);

    match compile_and_report(input, &source, use_colors) {
        Some(_) => {
            println!("{}", "OK".green().bold());
            Ok(true)
        }
        None => Ok(false),
    }
}

/// 符号表命令
fn cmd_symbols(input: &str, use_colors: bool) -> Result<bool> {
    let source = read_source(input)?;

    match compile_and_report(input, &source, use_colors) {
        Some(output) => {
            print!("{}", output.table.dump());
            Ok(true)
        }
        None => Ok(false),
    }
}

/// 记号流命令
fn cmd_tokens(input: &str, use_colors: bool) -> Result<bool> {
    let source = read_source(input)?;

    match tokenize(&source) {
        Ok(tokens) => {
            for token in &tokens {
                println!("{}", token);
            }
            Ok(true)
        }
        Err(err) => {
            let diag = Diagnostic::error(err.to_string())
                .at(err.position())
                .with_file(input);
            emitter(use_colors).emit_with_source(&diag, &source);
            Ok(false)
        }
    }
}
