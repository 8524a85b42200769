//! KPL 类型与常量值
//!
//! 类型是独占所有权的递归树：数组元素类型装箱在父节点里。
//! 对命名类型的引用会复制（`clone`）一棵独立的子树，
//! 因此任何两个对象都不会共享同一个类型节点。

use std::fmt;

/// KPL 类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Char,
    /// 固定大小数组，长度是类型的一部分
    Array { size: usize, element: Box<Type> },
}

impl Type {
    /// 构造数组类型
    pub fn array(size: usize, element: Type) -> Self {
        Type::Array {
            size,
            element: Box::new(element),
        }
    }

    /// 是否是基础类型 (integer / char)
    pub fn is_basic(&self) -> bool {
        matches!(self, Type::Int | Type::Char)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Type::Char)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// 数组的元素类型
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "integer"),
            Type::Char => write!(f, "char"),
            Type::Array { size, element } => write!(f, "array[{}] of {}", size, element),
        }
    }
}

/// 常量值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Int(i64),
    Char(char),
}

impl ConstantValue {
    /// 常量值的类型
    pub fn ty(&self) -> Type {
        match self {
            ConstantValue::Int(_) => Type::Int,
            ConstantValue::Char(_) => Type::Char,
        }
    }

    /// 取负；字符常量没有负值
    pub fn negate(self) -> Option<Self> {
        match self {
            ConstantValue::Int(i) => Some(ConstantValue::Int(i.wrapping_neg())),
            ConstantValue::Char(_) => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(i) => write!(f, "{}", i),
            ConstantValue::Char(c) => write!(f, "'{}'", c),
        }
    }
}
