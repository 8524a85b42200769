//! KPL Compiler Driver
//!
//! 编译器驱动模块：内置对象注册、扫描与分析，以及诊断的汇总

pub mod error;

pub use error::{CompileError, CompileResult};

use kpl_diagnostics::Diagnostic;
use kpl_sema::{analyze, SymbolTable};

/// 编译结果
#[derive(Debug)]
pub struct Compilation {
    /// 分析完成后的符号表
    pub table: SymbolTable,
    /// 警告信息
    pub warnings: Vec<Diagnostic>,
}

/// 编译 KPL 源代码
///
/// # Arguments
/// * `source` - KPL 源代码
///
/// # Returns
/// * `Ok(Compilation)` - 编译成功，返回符号表和警告
/// * `Err(CompileError)` - 第一个错误
///
/// # Example
/// ```
/// use kpl_driver::compile;
///
/// let output = compile("program p; begin call WRITELN end.").unwrap();
/// assert!(output.warnings.is_empty());
/// ```
pub fn compile(source: &str) -> CompileResult<Compilation> {
    log::info!("compiling {} bytes of source", source.len());

    let analysis = analyze(source)?;

    let mut warnings = Vec::new();
    if let Some(pos) = analysis.trailing {
        warnings.push(
            Diagnostic::warning("unexpected input after the end of the program")
                .at(pos)
                .with_note("everything after the final '.' is ignored"),
        );
    }

    log::info!(
        "compilation finished: {} objects, {} warning(s)",
        analysis.table.object_count(),
        warnings.len()
    );
    Ok(Compilation {
        table: analysis.table,
        warnings,
    })
}

/// 从文件编译
///
/// # Arguments
/// * `path` - 源文件路径
pub fn compile_file(path: &str) -> CompileResult<Compilation> {
    let source = std::fs::read_to_string(path)?;
    let mut output = compile(&source)?;
    output.warnings = output
        .warnings
        .into_iter()
        .map(|warning| warning.with_file(path))
        .collect();
    Ok(output)
}
