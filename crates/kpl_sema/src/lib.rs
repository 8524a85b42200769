//! KPL Semantic Analysis
//!
//! 语法分析与语义分析合为一遍，负责：
//! - 作用域与符号表 (SymbolTable)
//! - 名称解析与类型一致性检查 (checker)
//! - 递归下降分析 (Analyzer)
//!
//! # 设计原则
//!
//! - **Fail Fast**: 第一个错误即终止，每次编译最多一个诊断
//! - **No AST**: 声明在解析时直接进入符号表，表达式类型作为返回值向上传递

pub mod analyzer;
pub mod builtins;
pub mod checker;
pub mod error;
pub mod scope;
pub mod symbol;
pub mod types;

// 重新导出核心类型
pub use analyzer::{Analysis, Analyzer};
pub use error::{SemaResult, SemanticError};
pub use scope::{Scope, ScopeId, SymbolTable};
pub use symbol::{Object, ObjectId, ObjectKind, ParamMode};
pub use types::{ConstantValue, Type};

use kpl_syntax::{Lexer, TokenSource};

/// 从任意记号来源分析一个完整程序
pub fn analyze_tokens<S: TokenSource>(source: S) -> SemaResult<Analysis> {
    Analyzer::new(source)?.run()
}

/// 分析一段 KPL 源码
///
/// # Errors
///
/// 返回遇到的第一个词法、语法或语义错误
pub fn analyze(source: &str) -> SemaResult<Analysis> {
    analyze_tokens(Lexer::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_minimal_program() {
        let analysis = analyze("program p; begin end.").unwrap();
        assert!(analysis.trailing.is_none());
        assert_eq!(analysis.table.dump(), "Program p\n");
    }

    #[test]
    fn test_analyze_reports_first_error_only() {
        let err = analyze("program p; begin x := 1; y := 2 end.").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UndeclaredIdent {
                name: "x".into(),
                pos: kpl_diagnostics::Position::new(1, 18),
            }
        );
    }
}
