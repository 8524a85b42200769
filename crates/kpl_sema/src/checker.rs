//! Semantic Checker
//!
//! 名称解析与类型一致性检查。这里都是无状态的谓词，
//! 分析器在每个语法决策点内联调用它们，失败即返回错误。

use crate::error::{SemaResult, SemanticError};
use crate::scope::SymbolTable;
use crate::symbol::{ObjectId, ObjectKind};
use crate::types::Type;
use kpl_diagnostics::Position;

/// 名称在当前作用域中必须未被声明（外层作用域允许同名遮蔽）
pub fn require_fresh(table: &SymbolTable, name: &str, pos: Position) -> SemaResult<()> {
    match table.find_local(name) {
        Some(_) => Err(SemanticError::DuplicateIdent {
            name: name.to_string(),
            pos,
        }),
        None => Ok(()),
    }
}

/// 名称必须已声明（任意种类）
pub fn require_declared(table: &SymbolTable, name: &str, pos: Position) -> SemaResult<ObjectId> {
    table.lookup(name).ok_or_else(|| SemanticError::UndeclaredIdent {
        name: name.to_string(),
        pos,
    })
}

/// 查找并按种类过滤，缺失和种类不符分别报告
fn require_kind(
    table: &SymbolTable,
    name: &str,
    accept: fn(&ObjectKind) -> bool,
    undeclared: impl FnOnce(String) -> SemanticError,
    invalid: impl FnOnce() -> SemanticError,
) -> SemaResult<ObjectId> {
    let id = table
        .lookup(name)
        .ok_or_else(|| undeclared(name.to_string()))?;
    if accept(&table.object(id).kind) {
        Ok(id)
    } else {
        Err(invalid())
    }
}

pub fn require_declared_constant(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    require_kind(
        table,
        name,
        |kind| matches!(kind, ObjectKind::Constant(_)),
        |name| SemanticError::UndeclaredConstant { name, pos },
        || SemanticError::InvalidConstant { pos },
    )
}

pub fn require_declared_type(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    require_kind(
        table,
        name,
        |kind| matches!(kind, ObjectKind::Type(_)),
        |name| SemanticError::UndeclaredType { name, pos },
        || SemanticError::InvalidType { pos },
    )
}

pub fn require_declared_variable(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    require_kind(
        table,
        name,
        |kind| matches!(kind, ObjectKind::Variable(_)),
        |name| SemanticError::UndeclaredVariable { name, pos },
        || SemanticError::InvalidVariable { pos },
    )
}

pub fn require_declared_function(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    require_kind(
        table,
        name,
        |kind| matches!(kind, ObjectKind::Function(_)),
        |name| SemanticError::UndeclaredFunction { name, pos },
        || SemanticError::InvalidFunction { pos },
    )
}

pub fn require_declared_procedure(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    require_kind(
        table,
        name,
        |kind| matches!(kind, ObjectKind::Procedure(_)),
        |name| SemanticError::UndeclaredProcedure { name, pos },
        || SemanticError::InvalidProcedure { pos },
    )
}

/// 名称必须可以被赋值
///
/// 变量和参数总是可以；函数名只有在它自己的函数体内才可以（设置返回值）。
pub fn require_declared_lvalue(
    table: &SymbolTable,
    name: &str,
    pos: Position,
) -> SemaResult<ObjectId> {
    let id = require_declared(table, name, pos)?;
    match &table.object(id).kind {
        ObjectKind::Variable(_) | ObjectKind::Parameter(_) => Ok(id),
        ObjectKind::Function(_) if table.current_owner() == Some(id) => Ok(id),
        ObjectKind::Constant(_) => Err(SemanticError::ConstantAssign {
            name: name.to_string(),
            pos,
        }),
        ObjectKind::Function(_)
        | ObjectKind::Procedure(_)
        | ObjectKind::Type(_)
        | ObjectKind::Program(_) => Err(SemanticError::InvalidLValue { pos }),
    }
}

fn inconsistent(expected: impl Into<String>, found: &Type, pos: Position) -> SemanticError {
    SemanticError::TypeInconsistency {
        expected: expected.into(),
        found: found.to_string(),
        pos,
    }
}

pub fn require_int_type(ty: &Type, pos: Position) -> SemaResult<()> {
    if ty.is_int() {
        Ok(())
    } else {
        Err(inconsistent("integer", ty, pos))
    }
}

pub fn require_char_type(ty: &Type, pos: Position) -> SemaResult<()> {
    if ty.is_char() {
        Ok(())
    } else {
        Err(inconsistent("char", ty, pos))
    }
}

/// integer 或 char
pub fn require_basic_type(ty: &Type, pos: Position) -> SemaResult<()> {
    if ty.is_basic() {
        Ok(())
    } else {
        Err(inconsistent("integer or char", ty, pos))
    }
}

pub fn require_array_type(ty: &Type, pos: Position) -> SemaResult<()> {
    if ty.is_array() {
        Ok(())
    } else {
        Err(inconsistent("an array", ty, pos))
    }
}

/// 结构相等
pub fn require_type_equal(expected: &Type, found: &Type, pos: Position) -> SemaResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(inconsistent(expected.to_string(), found, pos))
    }
}
