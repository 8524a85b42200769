//! 符号表的文本输出 (`kplc symbols`)

use super::{ScopeId, SymbolTable};
use crate::symbol::{ObjectId, ObjectKind, ParamMode};
use std::fmt::{self, Write};

const INDENT: usize = 4;

impl SymbolTable {
    /// 从根程序开始，按声明顺序输出整棵符号树
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if let Some(program) = self.program() {
            // 写入 String 不会失败
            let _ = self.dump_object(&mut out, program, 0);
        }
        out
    }

    fn dump_object(&self, out: &mut String, id: ObjectId, depth: usize) -> fmt::Result {
        let pad = " ".repeat(depth * INDENT);
        let name = self.name(id);
        match &self.object(id).kind {
            ObjectKind::Program(p) => {
                writeln!(out, "{}Program {}", pad, name)?;
                self.dump_scope(out, p.scope, depth + 1)?;
            }
            ObjectKind::Constant(c) => writeln!(out, "{}Const {} = {}", pad, name, c.value)?,
            ObjectKind::Type(t) => writeln!(out, "{}Type {} = {}", pad, name, t.actual)?,
            ObjectKind::Variable(v) => writeln!(out, "{}Var {} : {}", pad, name, v.ty)?,
            ObjectKind::Function(f) => {
                match &f.return_type {
                    Some(ty) => writeln!(out, "{}Function {} : {}", pad, name, ty)?,
                    None => writeln!(out, "{}Function {}", pad, name)?,
                }
                self.dump_scope(out, f.scope, depth + 1)?;
            }
            ObjectKind::Procedure(p) => {
                writeln!(out, "{}Procedure {}", pad, name)?;
                self.dump_scope(out, p.scope, depth + 1)?;
            }
            ObjectKind::Parameter(p) => match p.mode {
                ParamMode::ByValue => writeln!(out, "{}Param {} : {}", pad, name, p.ty)?,
                ParamMode::ByReference => {
                    writeln!(out, "{}Param VAR {} : {}", pad, name, p.ty)?
                }
            },
        }
        Ok(())
    }

    fn dump_scope(&self, out: &mut String, scope: ScopeId, depth: usize) -> fmt::Result {
        for &object in self.scope(scope).objects() {
            self.dump_object(out, object, depth)?;
        }
        Ok(())
    }
}
