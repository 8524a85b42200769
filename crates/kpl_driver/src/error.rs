//! Compilation Errors
//!
//! 编译器驱动层的错误类型，集成统一诊断系统

use kpl_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
use kpl_sema::SemanticError;
use thiserror::Error;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    /// 分析错误（词法、语法或语义，每次编译至多一个）
    #[error("{0}")]
    Semantic(#[from] SemanticError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// 转换为诊断并收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink, file_path: Option<&str>) {
        let diag = match self {
            CompileError::Semantic(err) => err.to_diagnostic(),
            CompileError::Io(err) => Diagnostic::error(format!("IO error: {}", err)),
        };

        match file_path {
            Some(path) => sink.add(diag.with_file(path)),
            None => sink.add(diag),
        }
    }

    /// 使用统一诊断系统输出错误
    pub fn emit(&self, file_path: Option<&str>, source: Option<&str>, use_colors: bool) {
        let mut sink = DiagnosticSink::new();
        self.collect_to_sink(&mut sink, file_path);

        let emitter = if use_colors {
            Emitter::new()
        } else {
            Emitter::without_colors()
        };
        if let Some(src) = source {
            for diag in sink.diagnostics() {
                emitter.emit_with_source(diag, src);
            }
        } else {
            emitter.emit_all(sink.diagnostics());
        }
    }
}

/// 编译结果类型
pub type CompileResult<T> = Result<T, CompileError>;
