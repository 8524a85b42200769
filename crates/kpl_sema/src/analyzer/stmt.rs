//! 语句

use super::Analyzer;
use crate::checker;
use crate::error::{SemaResult, SemanticError};
use crate::symbol::ObjectKind;
use crate::types::Type;
use kpl_syntax::{TokenKind, TokenSource};

impl<S: TokenSource> Analyzer<S> {
    /// Statements ::= Statement { ; Statement }
    pub(super) fn compile_statements(&mut self) -> SemaResult<()> {
        self.compile_statement()?;
        while self.eat_if(TokenKind::Semicolon)? {
            self.compile_statement()?;
        }
        Ok(())
    }

    fn compile_statement(&mut self) -> SemaResult<()> {
        match self.lookahead.kind {
            TokenKind::Ident => self.compile_assign_st(),
            TokenKind::Call => self.compile_call_st(),
            TokenKind::Begin => self.compile_group_st(),
            TokenKind::If => self.compile_if_st(),
            TokenKind::While => self.compile_while_st(),
            TokenKind::For => self.compile_for_st(),
            // 空语句：lookahead 在 FOLLOW 集中
            TokenKind::Semicolon | TokenKind::End | TokenKind::Else => Ok(()),
            _ => Err(SemanticError::InvalidStatement {
                pos: self.lookahead.pos,
            }),
        }
    }

    /// LValue ::= ident [Indexes]，返回被赋值位置的类型
    fn compile_lvalue(&mut self) -> SemaResult<Type> {
        let (name, pos) = self.expect_ident()?;
        let id = checker::require_declared_lvalue(&self.table, &name, pos)?;

        match &self.table.object(id).kind {
            ObjectKind::Variable(v) if v.ty.is_array() => {
                let ty = v.ty.clone();
                self.compile_indexes(ty)
            }
            ObjectKind::Variable(v) => Ok(v.ty.clone()),
            ObjectKind::Parameter(p) => Ok(p.ty.clone()),
            ObjectKind::Function(f) => f
                .return_type
                .clone()
                .ok_or(SemanticError::InvalidFunction { pos }),
            _ => Err(SemanticError::InvalidLValue { pos }),
        }
    }

    /// LValue { , LValue } := Expression { , Expression }
    fn compile_assign_st(&mut self) -> SemaResult<()> {
        let mut targets = vec![self.compile_lvalue()?];
        while self.eat_if(TokenKind::Comma)? {
            targets.push(self.compile_lvalue()?);
        }

        self.expect(TokenKind::Assign)?;

        let mut values = vec![self.compile_expression()?];
        while self.eat_if(TokenKind::Comma)? {
            values.push(self.compile_expression()?);
        }

        let pos = self.current.pos;
        if targets.len() < values.len() {
            return Err(SemanticError::TooManyExpressions { pos });
        }
        if targets.len() > values.len() {
            return Err(SemanticError::TooFewExpressions { pos });
        }

        for (target, value) in targets.iter().zip(&values) {
            checker::require_type_equal(target, value, pos)?;
        }
        Ok(())
    }

    /// call ident Arguments
    fn compile_call_st(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::Call)?;
        let (name, pos) = self.expect_ident()?;
        let proc = checker::require_declared_procedure(&self.table, &name, pos)?;
        self.compile_arguments(proc)
    }

    /// begin Statements end
    fn compile_group_st(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::Begin)?;
        self.compile_statements()?;
        self.expect(TokenKind::End)
    }

    /// if Condition then Statement [else Statement]
    fn compile_if_st(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::If)?;
        self.compile_condition()?;
        self.expect(TokenKind::Then)?;
        self.compile_statement()?;
        if self.eat_if(TokenKind::Else)? {
            self.compile_statement()?;
        }
        Ok(())
    }

    /// while Condition do Statement
    fn compile_while_st(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::While)?;
        self.compile_condition()?;
        self.expect(TokenKind::Do)?;
        self.compile_statement()
    }

    /// for ident := Expression to Expression do Statement
    ///
    /// 两个边界表达式都必须与循环变量类型相同。
    fn compile_for_st(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::For)?;
        let (name, pos) = self.expect_ident()?;
        let var = checker::require_declared_variable(&self.table, &name, pos)?;
        let var_ty = match &self.table.object(var).kind {
            ObjectKind::Variable(v) => v.ty.clone(),
            _ => return Err(SemanticError::InvalidVariable { pos }),
        };

        self.expect(TokenKind::Assign)?;
        let from = self.compile_expression()?;
        checker::require_type_equal(&var_ty, &from, self.current.pos)?;

        self.expect(TokenKind::To)?;
        let to = self.compile_expression()?;
        checker::require_type_equal(&var_ty, &to, self.current.pos)?;

        self.expect(TokenKind::Do)?;
        self.compile_statement()
    }
}
