//! 表达式、条件、下标与实参

use super::Analyzer;
use crate::checker;
use crate::error::{SemaResult, SemanticError};
use crate::symbol::{ObjectId, ObjectKind, ParamMode};
use crate::types::Type;
use kpl_syntax::{TokenKind, TokenSource};

/// 加法链之后允许出现的记号
const EXPRESSION_FOLLOW: &[TokenKind] = &[
    TokenKind::To,
    TokenKind::Do,
    TokenKind::RPar,
    TokenKind::Comma,
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Le,
    TokenKind::Lt,
    TokenKind::Ge,
    TokenKind::Gt,
    TokenKind::RSel,
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Then,
];

/// 乘法链之后允许出现的记号：表达式的 FOLLOW 集加上 `+` `-`
fn in_term_follow(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Plus | TokenKind::Minus) || EXPRESSION_FOLLOW.contains(&kind)
}

/// 省略括号的实参表之后允许出现的记号：项的 FOLLOW 集加上 `*` `/`
fn in_arguments_follow(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Times | TokenKind::Slash) || in_term_follow(kind)
}

impl<S: TokenSource> Analyzer<S> {
    /// Condition ::= Expression relOp Expression
    pub(super) fn compile_condition(&mut self) -> SemaResult<()> {
        let left = self.compile_expression()?;
        checker::require_basic_type(&left, self.current.pos)?;

        match self.lookahead.kind {
            TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Le
            | TokenKind::Lt
            | TokenKind::Ge
            | TokenKind::Gt => self.advance()?,
            _ => {
                return Err(SemanticError::InvalidComparator {
                    pos: self.lookahead.pos,
                })
            }
        }

        let right = self.compile_expression()?;
        checker::require_type_equal(&left, &right, self.current.pos)
    }

    /// Expression ::= sum Expression { , Expression } | + Expr2 | - Expr2 | Expr2
    pub(super) fn compile_expression(&mut self) -> SemaResult<Type> {
        match self.lookahead.kind {
            TokenKind::Sum => {
                self.advance()?;
                self.compile_sum()
            }
            TokenKind::Plus | TokenKind::Minus => {
                self.advance()?;
                let ty = self.compile_additive()?;
                checker::require_int_type(&ty, self.current.pos)?;
                Ok(ty)
            }
            _ => self.compile_additive(),
        }
    }

    /// sum 的操作数一直延续到 `;`（不消费），每个都必须是整数
    fn compile_sum(&mut self) -> SemaResult<Type> {
        let mut count = 0usize;
        loop {
            let ty = self.compile_expression()?;
            checker::require_int_type(&ty, self.current.pos)?;
            count += 1;

            self.eat_if(TokenKind::Comma)?;
            if self.at(TokenKind::Semicolon) {
                break;
            }
        }
        log::trace!("sum of {} operands", count);
        Ok(Type::Int)
    }

    /// Term { (+|-) Term }，第一个项之后的每个项都必须是整数
    fn compile_additive(&mut self) -> SemaResult<Type> {
        let ty = self.compile_term()?;
        loop {
            match self.lookahead.kind {
                TokenKind::Plus | TokenKind::Minus => {
                    self.advance()?;
                    let operand = self.compile_term()?;
                    checker::require_int_type(&operand, self.current.pos)?;
                }
                kind if EXPRESSION_FOLLOW.contains(&kind) => return Ok(ty),
                _ => {
                    return Err(SemanticError::InvalidExpression {
                        pos: self.lookahead.pos,
                    })
                }
            }
        }
    }

    /// Factor { (*|/) Factor }
    fn compile_term(&mut self) -> SemaResult<Type> {
        let ty = self.compile_factor()?;
        loop {
            match self.lookahead.kind {
                TokenKind::Times | TokenKind::Slash => {
                    self.advance()?;
                    let operand = self.compile_factor()?;
                    checker::require_int_type(&operand, self.current.pos)?;
                }
                kind if in_term_follow(kind) => return Ok(ty),
                _ => {
                    return Err(SemanticError::InvalidTerm {
                        pos: self.lookahead.pos,
                    })
                }
            }
        }
    }

    /// Factor ::= number | charConst | 常量 | 变量[下标] | 参数 | 函数 Arguments
    fn compile_factor(&mut self) -> SemaResult<Type> {
        match self.lookahead.kind {
            TokenKind::Number => {
                self.advance()?;
                Ok(Type::Int)
            }
            TokenKind::CharLiteral => {
                self.advance()?;
                Ok(Type::Char)
            }
            TokenKind::Ident => {
                let (name, pos) = self.expect_ident()?;
                let id = checker::require_declared(&self.table, &name, pos)?;

                match &self.table.object(id).kind {
                    ObjectKind::Constant(c) => Ok(c.value.ty()),
                    ObjectKind::Variable(v) if v.ty.is_array() => {
                        let ty = v.ty.clone();
                        self.compile_indexes(ty)
                    }
                    ObjectKind::Variable(v) => Ok(v.ty.clone()),
                    ObjectKind::Parameter(p) => Ok(p.ty.clone()),
                    ObjectKind::Function(_) => {
                        self.compile_arguments(id)?;
                        match &self.table.object(id).kind {
                            ObjectKind::Function(f) => f
                                .return_type
                                .clone()
                                .ok_or(SemanticError::InvalidFunction { pos }),
                            _ => Err(SemanticError::InvalidFunction { pos }),
                        }
                    }
                    ObjectKind::Program(_) | ObjectKind::Type(_) | ObjectKind::Procedure(_) => {
                        Err(SemanticError::InvalidFactor { pos })
                    }
                }
            }
            _ => Err(SemanticError::InvalidFactor {
                pos: self.lookahead.pos,
            }),
        }
    }

    /// Indexes ::= { [ Expression ] }
    ///
    /// 每个 `[` 都要求当前类型仍是数组；全部下标之后结果必须是基本类型。
    pub(super) fn compile_indexes(&mut self, mut ty: Type) -> SemaResult<Type> {
        while self.at(TokenKind::LSel) {
            checker::require_array_type(&ty, self.lookahead.pos)?;
            self.advance()?;

            let index = self.compile_expression()?;
            checker::require_int_type(&index, self.current.pos)?;

            ty = match ty {
                Type::Array { element, .. } => *element,
                other => other,
            };
            self.expect(TokenKind::RSel)?;
        }
        checker::require_basic_type(&ty, self.current.pos)?;
        Ok(ty)
    }

    /// Arguments ::= ( Expression { , Expression } ) | ()
    ///
    /// 实参个数必须与形参个数相同；没有形参时可以省略括号。
    pub(super) fn compile_arguments(&mut self, callee: ObjectId) -> SemaResult<()> {
        let name = self.table.name(callee).to_string();
        let params: Vec<(ParamMode, Type)> = self
            .table
            .object(callee)
            .params()
            .unwrap_or_default()
            .iter()
            .filter_map(|&param| match &self.table.object(param).kind {
                ObjectKind::Parameter(p) => Some((p.mode, p.ty.clone())),
                _ => None,
            })
            .collect();

        let mismatch = |pos| SemanticError::ParameterArgumentMismatch {
            name: name.clone(),
            pos,
        };

        if !self.at(TokenKind::LPar) {
            if !params.is_empty() {
                return Err(mismatch(self.current.pos));
            }
            if !in_arguments_follow(self.lookahead.kind) {
                return Err(SemanticError::InvalidArguments {
                    pos: self.lookahead.pos,
                });
            }
            return Ok(());
        }
        self.advance()?;

        if params.is_empty() {
            if !self.at(TokenKind::RPar) {
                return Err(mismatch(self.current.pos));
            }
            return self.advance();
        }

        let mut remaining = params.iter();
        loop {
            let Some((mode, ty)) = remaining.next() else {
                return Err(mismatch(self.current.pos));
            };
            self.compile_argument(*mode, ty)?;
            if !self.eat_if(TokenKind::Comma)? {
                break;
            }
        }
        if remaining.next().is_some() {
            return Err(mismatch(self.current.pos));
        }
        self.expect(TokenKind::RPar)
    }

    /// 传引用的形参要求实参以可赋值的标识符开头
    fn compile_argument(&mut self, mode: ParamMode, param_ty: &Type) -> SemaResult<()> {
        if mode == ParamMode::ByReference {
            match self.lookahead.ident() {
                Some(name) => {
                    checker::require_declared_lvalue(&self.table, name, self.lookahead.pos)?;
                }
                None => {
                    return Err(SemanticError::TypeInconsistency {
                        expected: format!("a variable of type {}", param_ty),
                        found: self.lookahead.kind.to_string(),
                        pos: self.current.pos,
                    })
                }
            }
        }

        let ty = self.compile_expression()?;
        checker::require_type_equal(param_ty, &ty, self.current.pos)
    }
}
