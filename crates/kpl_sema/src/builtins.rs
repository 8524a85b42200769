//! Built-in Subprograms
//!
//! 内置函数/过程的注册，在分析第一个记号之前完成

use crate::scope::SymbolTable;
use crate::symbol::ParamMode;
use crate::types::Type;

/// Register all built-in subprograms
pub fn register_builtins(table: &mut SymbolTable) {
    define_fn(table, "READC", Type::Char);
    define_fn(table, "READI", Type::Int);

    define_proc(table, "WRITEI", vec![("i", Type::Int)]);
    define_proc(table, "WRITEC", vec![("ch", Type::Char)]);
    define_proc(table, "WRITELN", vec![]);
}

/// Helper to define a built-in function without parameters
fn define_fn(table: &mut SymbolTable, name: &str, return_type: Type) {
    let func = table.create_function(name);
    table.set_return_type(func, return_type);
    table.declare_global(func);
}

/// Helper to define a built-in procedure; parameters only live in the param list
fn define_proc(table: &mut SymbolTable, name: &str, params: Vec<(&str, Type)>) {
    let proc = table.create_procedure(name);
    for (param_name, ty) in params {
        let param = table.create_parameter(param_name, ParamMode::ByValue, ty, proc);
        table.attach_param(proc, param);
    }
    table.declare_global(proc);
}
