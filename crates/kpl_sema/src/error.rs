//! Analysis Error Types
//!
//! 语法/语义分析错误定义。分析是遇错即停的：
//! 每次编译最多产生一个错误，它带着出错记号的行列位置。

use kpl_diagnostics::{Diagnostic, Position};
use kpl_syntax::{LexError, TokenKind};
use thiserror::Error;

/// 分析结果类型
pub type SemaResult<T> = Result<T, SemanticError>;

/// 语法/语义分析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    // ============ 词法与语法错误 ============
    /// 扫描器拉取记号时失败
    #[error("{0}")]
    Lexical(#[from] LexError),

    /// 向前看记号不是期望的终结符
    #[error("{expected} expected, found {found}")]
    MissingToken {
        expected: TokenKind,
        found: TokenKind,
        pos: Position,
    },

    // ============ 名称解析错误 ============
    /// 当前作用域内重复声明
    #[error("duplicate identifier '{name}'")]
    DuplicateIdent { name: String, pos: Position },

    #[error("undeclared identifier '{name}'")]
    UndeclaredIdent { name: String, pos: Position },

    #[error("undeclared constant '{name}'")]
    UndeclaredConstant { name: String, pos: Position },

    /// 常量表达式引用了字符常量
    #[error("undeclared integer constant '{name}'")]
    UndeclaredIntConstant { name: String, pos: Position },

    #[error("undeclared type '{name}'")]
    UndeclaredType { name: String, pos: Position },

    #[error("undeclared variable '{name}'")]
    UndeclaredVariable { name: String, pos: Position },

    #[error("undeclared function '{name}'")]
    UndeclaredFunction { name: String, pos: Position },

    #[error("undeclared procedure '{name}'")]
    UndeclaredProcedure { name: String, pos: Position },

    // ============ 种类/文法位置错误 ============
    #[error("invalid constant")]
    InvalidConstant { pos: Position },

    #[error("invalid type")]
    InvalidType { pos: Position },

    /// 只能是 integer 或 char
    #[error("invalid basic type")]
    InvalidBasicType { pos: Position },

    #[error("invalid variable")]
    InvalidVariable { pos: Position },

    #[error("invalid function")]
    InvalidFunction { pos: Position },

    #[error("invalid procedure")]
    InvalidProcedure { pos: Position },

    #[error("invalid parameter")]
    InvalidParameter { pos: Position },

    #[error("invalid statement")]
    InvalidStatement { pos: Position },

    #[error("invalid lvalue in assignment")]
    InvalidLValue { pos: Position },

    #[error("invalid arguments")]
    InvalidArguments { pos: Position },

    #[error("invalid expression")]
    InvalidExpression { pos: Position },

    #[error("invalid term")]
    InvalidTerm { pos: Position },

    #[error("invalid factor")]
    InvalidFactor { pos: Position },

    #[error("invalid comparator")]
    InvalidComparator { pos: Position },

    // ============ 类型与元数错误 ============
    /// 给常量赋值
    #[error("cannot assign to constant '{name}'")]
    ConstantAssign { name: String, pos: Position },

    /// 类型不一致
    #[error("type inconsistency: expected {expected}, found {found}")]
    TypeInconsistency {
        expected: String,
        found: String,
        pos: Position,
    },

    #[error("too many expressions on the right of ':='")]
    TooManyExpressions { pos: Position },

    #[error("too few expressions on the right of ':='")]
    TooFewExpressions { pos: Position },

    /// 实参个数与形参个数不一致
    #[error("arguments of '{name}' do not match its parameters")]
    ParameterArgumentMismatch { name: String, pos: Position },
}

impl SemanticError {
    /// 获取错误发生的位置
    pub fn position(&self) -> Position {
        match self {
            Self::Lexical(err) => err.position(),
            Self::MissingToken { pos, .. }
            | Self::DuplicateIdent { pos, .. }
            | Self::UndeclaredIdent { pos, .. }
            | Self::UndeclaredConstant { pos, .. }
            | Self::UndeclaredIntConstant { pos, .. }
            | Self::UndeclaredType { pos, .. }
            | Self::UndeclaredVariable { pos, .. }
            | Self::UndeclaredFunction { pos, .. }
            | Self::UndeclaredProcedure { pos, .. }
            | Self::InvalidConstant { pos }
            | Self::InvalidType { pos }
            | Self::InvalidBasicType { pos }
            | Self::InvalidVariable { pos }
            | Self::InvalidFunction { pos }
            | Self::InvalidProcedure { pos }
            | Self::InvalidParameter { pos }
            | Self::InvalidStatement { pos }
            | Self::InvalidLValue { pos }
            | Self::InvalidArguments { pos }
            | Self::InvalidExpression { pos }
            | Self::InvalidTerm { pos }
            | Self::InvalidFactor { pos }
            | Self::InvalidComparator { pos }
            | Self::ConstantAssign { pos, .. }
            | Self::TypeInconsistency { pos, .. }
            | Self::TooManyExpressions { pos }
            | Self::TooFewExpressions { pos }
            | Self::ParameterArgumentMismatch { pos, .. } => *pos,
        }
    }

    /// 转换为统一诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).at(self.position());
        match self {
            Self::DuplicateIdent { .. } => {
                diag.with_note("names must be unique within one block; inner blocks may shadow")
            }
            Self::ConstantAssign { .. } => {
                diag.suggest("declare it in a 'var' section to make it assignable")
            }
            Self::UndeclaredIntConstant { .. } => {
                diag.with_note("only integer constants may appear in constant expressions")
            }
            Self::ParameterArgumentMismatch { .. } => {
                diag.with_note("the number of arguments must equal the number of parameters")
            }
            _ => diag,
        }
    }
}
