//! 声明：块、常量、类型、变量、函数/过程、参数

use super::Analyzer;
use crate::checker;
use crate::error::{SemaResult, SemanticError};
use crate::symbol::{ObjectId, ObjectKind, ParamMode};
use crate::types::{ConstantValue, Type};
use kpl_syntax::{TokenKind, TokenSource};

impl<S: TokenSource> Analyzer<S> {
    /// Block ::= [const ..] [type ..] [var ..] SubDecls begin Statements end
    pub(super) fn compile_block(&mut self) -> SemaResult<()> {
        if self.eat_if(TokenKind::Const)? {
            loop {
                self.compile_const_decl()?;
                if !self.at(TokenKind::Ident) {
                    break;
                }
            }
        }

        if self.eat_if(TokenKind::Type)? {
            loop {
                self.compile_type_decl()?;
                if !self.at(TokenKind::Ident) {
                    break;
                }
            }
        }

        if self.eat_if(TokenKind::Var)? {
            loop {
                self.compile_var_decl()?;
                if !self.at(TokenKind::Ident) {
                    break;
                }
            }
        }

        self.compile_sub_decls()?;

        self.expect(TokenKind::Begin)?;
        self.compile_statements()?;
        self.expect(TokenKind::End)
    }

    /// ident = Constant ;
    fn compile_const_decl(&mut self) -> SemaResult<()> {
        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;
        self.expect(TokenKind::Eq)?;
        let value = self.compile_constant()?;

        let constant = self.table.create_constant(&name, value);
        self.table.declare(constant);
        self.expect(TokenKind::Semicolon)
    }

    /// ident = Type ;
    fn compile_type_decl(&mut self) -> SemaResult<()> {
        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;
        self.expect(TokenKind::Eq)?;
        let actual = self.compile_type()?;

        let alias = self.table.create_type(&name, actual);
        self.table.declare(alias);
        self.expect(TokenKind::Semicolon)
    }

    /// ident : Type ;
    fn compile_var_decl(&mut self) -> SemaResult<()> {
        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.compile_type()?;

        let variable = self.table.create_variable(&name, ty);
        self.table.declare(variable);
        self.expect(TokenKind::Semicolon)
    }

    fn compile_sub_decls(&mut self) -> SemaResult<()> {
        loop {
            match self.lookahead.kind {
                TokenKind::Function => self.compile_func_decl()?,
                TokenKind::Procedure => self.compile_proc_decl()?,
                _ => return Ok(()),
            }
        }
    }

    /// function ident Params : BasicType ; Block ;
    ///
    /// 函数对象先声明在外层作用域，函数体内才能递归调用自己。
    fn compile_func_decl(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::Function)?;
        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;

        let func = self.table.create_function(&name);
        self.table.declare(func);
        self.enter_scope_of(func);

        self.compile_params(func)?;
        self.expect(TokenKind::Colon)?;
        let return_type = self.compile_basic_type()?;
        self.table.set_return_type(func, return_type);
        self.expect(TokenKind::Semicolon)?;

        self.compile_block()?;
        self.expect(TokenKind::Semicolon)?;
        self.table.exit_scope();
        Ok(())
    }

    /// procedure ident Params ; Block ;
    fn compile_proc_decl(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::Procedure)?;
        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;

        let proc = self.table.create_procedure(&name);
        self.table.declare(proc);
        self.enter_scope_of(proc);

        self.compile_params(proc)?;
        self.expect(TokenKind::Semicolon)?;

        self.compile_block()?;
        self.expect(TokenKind::Semicolon)?;
        self.table.exit_scope();
        Ok(())
    }

    /// Params ::= [ ( Param { ; Param } ) ]
    fn compile_params(&mut self, owner: ObjectId) -> SemaResult<()> {
        if self.eat_if(TokenKind::LPar)? {
            self.compile_param(owner)?;
            while self.eat_if(TokenKind::Semicolon)? {
                self.compile_param(owner)?;
            }
            self.expect(TokenKind::RPar)?;
        }
        Ok(())
    }

    /// Param ::= [var] ident : BasicType
    fn compile_param(&mut self, owner: ObjectId) -> SemaResult<()> {
        let mode = match self.lookahead.kind {
            TokenKind::Ident => ParamMode::ByValue,
            TokenKind::Var => {
                self.advance()?;
                ParamMode::ByReference
            }
            _ => {
                return Err(SemanticError::InvalidParameter {
                    pos: self.lookahead.pos,
                })
            }
        };

        let (name, pos) = self.expect_ident()?;
        checker::require_fresh(&self.table, &name, pos)?;
        self.expect(TokenKind::Colon)?;
        let ty = self.compile_basic_type()?;

        let param = self.table.create_parameter(&name, mode, ty, owner);
        self.table.declare(param);
        Ok(())
    }

    // ============ 常量表达式 ============

    /// Constant ::= + Constant2 | - Constant2 | charConst | Constant2
    fn compile_constant(&mut self) -> SemaResult<ConstantValue> {
        match self.lookahead.kind {
            TokenKind::Plus => {
                self.advance()?;
                self.compile_int_constant()
            }
            TokenKind::Minus => {
                self.advance()?;
                let value = self.compile_int_constant()?;
                value.negate().ok_or(SemanticError::InvalidConstant {
                    pos: self.current.pos,
                })
            }
            TokenKind::CharLiteral => {
                self.advance()?;
                let c = self.current.char_value().unwrap_or_default();
                Ok(ConstantValue::Char(c))
            }
            _ => self.compile_int_constant(),
        }
    }

    /// Constant2 ::= number | 整数常量名
    fn compile_int_constant(&mut self) -> SemaResult<ConstantValue> {
        match self.lookahead.kind {
            TokenKind::Number => {
                self.advance()?;
                Ok(ConstantValue::Int(self.current.number().unwrap_or_default()))
            }
            TokenKind::Ident => {
                let (name, pos) = self.expect_ident()?;
                let id = checker::require_declared_constant(&self.table, &name, pos)?;
                match &self.table.object(id).kind {
                    ObjectKind::Constant(c) if c.value.ty().is_int() => Ok(c.value),
                    _ => Err(SemanticError::UndeclaredIntConstant { name, pos }),
                }
            }
            _ => Err(SemanticError::InvalidConstant {
                pos: self.lookahead.pos,
            }),
        }
    }

    // ============ 类型表达式 ============

    /// Type ::= integer | char | array [ number ] of Type | 类型名
    fn compile_type(&mut self) -> SemaResult<Type> {
        match self.lookahead.kind {
            TokenKind::Integer => {
                self.advance()?;
                Ok(Type::Int)
            }
            TokenKind::Char => {
                self.advance()?;
                Ok(Type::Char)
            }
            TokenKind::Array => {
                self.advance()?;
                self.expect(TokenKind::LSel)?;
                self.expect(TokenKind::Number)?;
                let size = self.current.number().unwrap_or_default();
                let size = usize::try_from(size).map_err(|_| SemanticError::InvalidType {
                    pos: self.current.pos,
                })?;
                self.expect(TokenKind::RSel)?;
                self.expect(TokenKind::Of)?;
                let element = self.compile_type()?;
                Ok(Type::array(size, element))
            }
            TokenKind::Ident => {
                let (name, pos) = self.expect_ident()?;
                let id = checker::require_declared_type(&self.table, &name, pos)?;
                match &self.table.object(id).kind {
                    ObjectKind::Type(t) => Ok(t.actual.clone()),
                    _ => Err(SemanticError::InvalidType { pos }),
                }
            }
            _ => Err(SemanticError::InvalidType {
                pos: self.lookahead.pos,
            }),
        }
    }

    /// BasicType ::= integer | char
    fn compile_basic_type(&mut self) -> SemaResult<Type> {
        match self.lookahead.kind {
            TokenKind::Integer => {
                self.advance()?;
                Ok(Type::Int)
            }
            TokenKind::Char => {
                self.advance()?;
                Ok(Type::Char)
            }
            _ => Err(SemanticError::InvalidBasicType {
                pos: self.lookahead.pos,
            }),
        }
    }
}
