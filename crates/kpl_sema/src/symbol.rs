//! Symbol Definitions
//!
//! 符号表中的对象。每种对象一个属性结构体，
//! 通过 [`ObjectKind`] 这个带标签的枚举区分，匹配时必须穷尽。

use crate::scope::ScopeId;
use crate::types::{ConstantValue, Type};
use lasso::Spur;

/// 对象 ID，用于在符号表中唯一标识
pub type ObjectId = usize;

/// 参数传递方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// 传值
    ByValue,
    /// 传引用 (`var` 参数)，实参必须是左值
    ByReference,
}

/// 符号表对象：名称 + 按种类区分的属性
#[derive(Debug, Clone)]
pub struct Object {
    /// 驻留后的名称，通过 `SymbolTable::name` 还原
    pub name: Spur,
    pub kind: ObjectKind,
}

/// 对象种类及其属性
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Program(ProgramAttrs),
    Constant(ConstantAttrs),
    Type(TypeAttrs),
    Variable(VariableAttrs),
    Function(FunctionAttrs),
    Procedure(ProcedureAttrs),
    Parameter(ParameterAttrs),
}

#[derive(Debug, Clone)]
pub struct ProgramAttrs {
    pub scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct ConstantAttrs {
    pub value: ConstantValue,
}

/// 类型别名
#[derive(Debug, Clone)]
pub struct TypeAttrs {
    pub actual: Type,
}

#[derive(Debug, Clone)]
pub struct VariableAttrs {
    /// 声明所在的作用域
    pub scope: ScopeId,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct FunctionAttrs {
    /// 形参列表（有序），同时也出现在函数体作用域中
    pub params: Vec<ObjectId>,
    /// 函数体作用域
    pub scope: ScopeId,
    /// 返回类型，解析完函数头之后才确定
    pub return_type: Option<Type>,
}

#[derive(Debug, Clone)]
pub struct ProcedureAttrs {
    pub params: Vec<ObjectId>,
    pub scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct ParameterAttrs {
    pub mode: ParamMode,
    /// 只能是 integer 或 char
    pub ty: Type,
    /// 所属的函数或过程
    pub owner: ObjectId,
}

impl ObjectKind {
    /// 种类名称，用于诊断和符号表输出
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Program(_) => "program",
            ObjectKind::Constant(_) => "constant",
            ObjectKind::Type(_) => "type",
            ObjectKind::Variable(_) => "variable",
            ObjectKind::Function(_) => "function",
            ObjectKind::Procedure(_) => "procedure",
            ObjectKind::Parameter(_) => "parameter",
        }
    }
}

impl Object {
    pub fn new(name: Spur, kind: ObjectKind) -> Self {
        Self { name, kind }
    }

    /// 函数或过程的形参列表
    pub fn params(&self) -> Option<&[ObjectId]> {
        match &self.kind {
            ObjectKind::Function(f) => Some(&f.params),
            ObjectKind::Procedure(p) => Some(&p.params),
            _ => None,
        }
    }

    pub(crate) fn params_mut(&mut self) -> Option<&mut Vec<ObjectId>> {
        match &mut self.kind {
            ObjectKind::Function(f) => Some(&mut f.params),
            ObjectKind::Procedure(p) => Some(&mut p.params),
            _ => None,
        }
    }

    /// 对象自己打开的作用域（程序、函数、过程）
    pub fn own_scope(&self) -> Option<ScopeId> {
        match &self.kind {
            ObjectKind::Program(p) => Some(p.scope),
            ObjectKind::Function(f) => Some(f.scope),
            ObjectKind::Procedure(p) => Some(p.scope),
            _ => None,
        }
    }
}
