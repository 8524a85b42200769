use super::{Scope, ScopeId};
use crate::builtins;
use crate::symbol::{
    ConstantAttrs, FunctionAttrs, Object, ObjectId, ObjectKind, ParamMode, ParameterAttrs,
    ProcedureAttrs, ProgramAttrs, TypeAttrs, VariableAttrs,
};
use crate::types::{ConstantValue, Type};
use lasso::Rodeo;

/// 符号表 - 作用域链 + 对象 arena + 全局内置对象
///
/// 一次编译独占一个符号表。整个表随所有者一起释放，
/// 分析中途出错时也不需要手动清理任何部分构造的状态。
#[derive(Debug)]
pub struct SymbolTable {
    /// 标识符驻留
    interner: Rodeo,
    /// 所有作用域（由 ScopeId 索引）
    scopes: Vec<Scope>,
    /// 所有对象（由 ObjectId 索引）
    objects: Vec<Object>,
    /// 内置对象，仅在整条作用域链查找失败后才查找
    globals: Vec<ObjectId>,
    /// 根程序对象
    program: Option<ObjectId>,
    /// 当前作用域
    current: Option<ScopeId>,
}

impl SymbolTable {
    /// 创建空符号表（不含内置对象）
    pub fn new() -> Self {
        Self {
            interner: Rodeo::default(),
            scopes: Vec::new(),
            objects: Vec::new(),
            globals: Vec::new(),
            program: None,
            current: None,
        }
    }

    /// 创建符号表并注册 READC / READI / WRITEI / WRITEC / WRITELN
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        builtins::register_builtins(&mut table);
        table
    }

    // ============ 构造 ============

    fn alloc_scope(&mut self, owner: Option<ObjectId>, outer: Option<ScopeId>) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(id, owner, outer));
        id
    }

    fn alloc_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let name = self.interner.get_or_intern(name);
        let id = self.objects.len();
        self.objects.push(Object::new(name, kind));
        id
    }

    /// 为函数/过程/程序分配对象和作用域，作用域的所有者指回对象
    fn alloc_with_scope(
        &mut self,
        name: &str,
        outer: Option<ScopeId>,
        make: impl FnOnce(ScopeId) -> ObjectKind,
    ) -> ObjectId {
        let id = self.objects.len();
        let scope = self.alloc_scope(Some(id), outer);
        self.alloc_object(name, make(scope))
    }

    /// 创建程序对象，同时成为符号表的根
    pub fn create_program(&mut self, name: &str) -> ObjectId {
        let id = self.alloc_with_scope(name, None, |scope| {
            ObjectKind::Program(ProgramAttrs { scope })
        });
        self.program = Some(id);
        id
    }

    pub fn create_constant(&mut self, name: &str, value: ConstantValue) -> ObjectId {
        self.alloc_object(name, ObjectKind::Constant(ConstantAttrs { value }))
    }

    pub fn create_type(&mut self, name: &str, actual: Type) -> ObjectId {
        self.alloc_object(name, ObjectKind::Type(TypeAttrs { actual }))
    }

    /// 变量记录声明时所在的作用域（即当前作用域）
    ///
    /// 必须在某个作用域打开之后调用。
    pub fn create_variable(&mut self, name: &str, ty: Type) -> ObjectId {
        debug_assert!(
            self.current.is_some(),
            "variable '{}' created without an open scope",
            name
        );
        let scope = self.current.unwrap_or_default();
        self.alloc_object(name, ObjectKind::Variable(VariableAttrs { scope, ty }))
    }

    /// 函数体作用域的外层是当前作用域
    pub fn create_function(&mut self, name: &str) -> ObjectId {
        let outer = self.current;
        self.alloc_with_scope(name, outer, |scope| {
            ObjectKind::Function(FunctionAttrs {
                params: Vec::new(),
                scope,
                return_type: None,
            })
        })
    }

    pub fn create_procedure(&mut self, name: &str) -> ObjectId {
        let outer = self.current;
        self.alloc_with_scope(name, outer, |scope| {
            ObjectKind::Procedure(ProcedureAttrs {
                params: Vec::new(),
                scope,
            })
        })
    }

    pub fn create_parameter(
        &mut self,
        name: &str,
        mode: ParamMode,
        ty: Type,
        owner: ObjectId,
    ) -> ObjectId {
        self.alloc_object(
            name,
            ObjectKind::Parameter(ParameterAttrs { mode, ty, owner }),
        )
    }

    /// 设置函数返回类型
    pub fn set_return_type(&mut self, function: ObjectId, ty: Type) {
        if let ObjectKind::Function(attrs) = &mut self.objects[function].kind {
            attrs.return_type = Some(ty);
        }
    }

    // ============ 声明与作用域切换 ============

    /// 在当前作用域声明对象
    ///
    /// 参数对象同时追加到所属函数/过程的形参列表。
    /// 这里不做重名检查，那是 checker 在构造对象之前的职责。
    /// 必须在某个作用域打开之后调用。
    pub fn declare(&mut self, object: ObjectId) {
        debug_assert!(
            self.current.is_some(),
            "declare '{}' without an open scope",
            self.name(object)
        );
        let Some(scope) = self.current else {
            log::error!("declare '{}' without an open scope", self.name(object));
            return;
        };

        if matches!(self.objects[object].kind, ObjectKind::Parameter(_)) {
            if let Some(owner) = self.scopes[scope].owner {
                self.attach_param(owner, object);
            }
        }

        log::trace!(
            "declare {} '{}' in scope #{}",
            self.objects[object].kind.name(),
            self.name(object),
            scope
        );
        self.scopes[scope].push(object);
    }

    /// 追加到函数/过程的形参列表
    pub(crate) fn attach_param(&mut self, owner: ObjectId, param: ObjectId) {
        if let Some(params) = self.objects[owner].params_mut() {
            params.push(param);
        }
    }

    /// 注册内置对象
    pub(crate) fn declare_global(&mut self, object: ObjectId) {
        self.globals.push(object);
    }

    /// 进入作用域
    pub fn enter_scope(&mut self, scope: ScopeId) {
        log::debug!("enter scope #{}", scope);
        self.current = Some(scope);
    }

    /// 退出当前作用域，回到词法外层作用域
    pub fn exit_scope(&mut self) {
        if let Some(scope) = self.current {
            log::debug!("exit scope #{}", scope);
            self.current = self.scopes[scope].outer;
        }
    }

    // ============ 查找 ============

    /// 仅在指定作用域中查找（不向外查找）
    pub fn find_in_scope(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        let key = self.interner.get(name)?;
        self.scopes[scope]
            .objects()
            .iter()
            .copied()
            .find(|&id| self.objects[id].name == key)
    }

    /// 仅在当前作用域查找
    pub fn find_local(&self, name: &str) -> Option<ObjectId> {
        self.current
            .and_then(|scope| self.find_in_scope(scope, name))
    }

    /// 查找符号：当前作用域 -> 逐层外层作用域 -> 内置对象
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        let key = self.interner.get(name)?;

        let mut scope_id = self.current;
        while let Some(id) = scope_id {
            if let Some(found) = self.find_in_scope(id, name) {
                return Some(found);
            }
            scope_id = self.scopes[id].outer;
        }

        self.globals
            .iter()
            .copied()
            .find(|&id| self.objects[id].name == key)
    }

    // ============ 访问 ============

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// 对象名称
    pub fn name(&self, id: ObjectId) -> &str {
        self.interner.resolve(&self.objects[id].name)
    }

    /// 当前作用域
    pub fn current_scope(&self) -> Option<ScopeId> {
        self.current
    }

    /// 当前作用域的所有者
    pub fn current_owner(&self) -> Option<ObjectId> {
        self.current.and_then(|scope| self.scopes[scope].owner)
    }

    /// 根程序对象
    pub fn program(&self) -> Option<ObjectId> {
        self.program
    }

    /// 内置对象
    pub fn globals(&self) -> &[ObjectId] {
        &self.globals
    }

    /// 对象数量（含内置对象）
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
