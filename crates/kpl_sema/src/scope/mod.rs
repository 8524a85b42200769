//! Scope Management
//!
//! 作用域管理，处理嵌套作用域和符号查找。
//! 作用域和对象都存放在 [`SymbolTable`] 的 arena 中，以 ID 互相引用。

use crate::symbol::ObjectId;

mod dump;
pub mod table;
pub use table::SymbolTable;

/// 作用域 ID
pub type ScopeId = usize;

/// 单个作用域
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    /// 打开这个作用域的程序、函数或过程
    pub owner: Option<ObjectId>,
    /// 词法上的外层作用域（最外层为 None）
    pub outer: Option<ScopeId>,
    /// 按声明顺序排列的本地对象
    objects: Vec<ObjectId>,
}

impl Scope {
    pub fn new(id: ScopeId, owner: Option<ObjectId>, outer: Option<ScopeId>) -> Self {
        Self {
            id,
            owner,
            outer,
            objects: Vec::new(),
        }
    }

    /// 本地对象，按声明顺序
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub(crate) fn push(&mut self, object: ObjectId) {
        self.objects.push(object);
    }
}
