//! Analyzer
//!
//! 递归下降的语法分析与语义分析合为一遍：
//! 声明在解析时直接写入符号表，表达式的类型作为解析函数的返回值向上传递，
//! 不构造 AST。第一个错误即终止整次分析。

mod decl;
mod expr;
mod stmt;

use crate::error::{SemaResult, SemanticError};
use crate::scope::SymbolTable;
use crate::symbol::ObjectId;
use kpl_diagnostics::Position;
use kpl_syntax::{Token, TokenKind, TokenSource};

/// 一次成功分析的结果
///
/// 持有完整的符号表；丢弃它即释放整棵符号树。
#[derive(Debug)]
pub struct Analysis {
    pub table: SymbolTable,
    /// 程序结尾 `.` 之后仍有输入时，多余输入的起始位置
    pub trailing: Option<Position>,
}

/// 语法/语义分析器
///
/// 维护两个记号的窗口：`current` 是刚消费的记号，`lookahead` 是下一个未消费的记号。
pub struct Analyzer<S: TokenSource> {
    source: S,
    current: Token,
    lookahead: Token,
    table: SymbolTable,
}

impl<S: TokenSource> Analyzer<S> {
    /// 注册内置对象，然后拉取第一个记号
    pub fn new(mut source: S) -> SemaResult<Self> {
        let table = SymbolTable::with_builtins();
        let lookahead = source.next_token()?;
        Ok(Self {
            source,
            current: Token::eof(Position::default()),
            lookahead,
            table,
        })
    }

    /// 分析整个程序
    pub fn run(mut self) -> SemaResult<Analysis> {
        self.compile_program()?;

        let trailing = match self.lookahead.kind {
            TokenKind::Eof => None,
            _ => Some(self.lookahead.pos),
        };
        if let Some(pos) = trailing {
            log::debug!("input continues after the final '.' at {}", pos);
        }

        Ok(Analysis {
            table: self.table,
            trailing,
        })
    }

    // ============ 记号窗口 ============

    /// 移动窗口：lookahead 成为 current，并从来源拉取新的 lookahead
    fn advance(&mut self) -> SemaResult<()> {
        let next = self.source.next_token()?;
        self.current = std::mem::replace(&mut self.lookahead, next);
        log::trace!("shift {}", self.current);
        Ok(())
    }

    /// 消费一个指定类别的记号，否则报告缺少记号
    fn expect(&mut self, kind: TokenKind) -> SemaResult<()> {
        if self.lookahead.kind == kind {
            self.advance()
        } else {
            Err(SemanticError::MissingToken {
                expected: kind,
                found: self.lookahead.kind,
                pos: self.lookahead.pos,
            })
        }
    }

    /// 消费一个标识符，返回它的文本和位置
    fn expect_ident(&mut self) -> SemaResult<(String, Position)> {
        self.expect(TokenKind::Ident)?;
        let name = self.current.ident().unwrap_or_default().to_string();
        Ok((name, self.current.pos))
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    /// 若 lookahead 是指定类别则消费它
    fn eat_if(&mut self, kind: TokenKind) -> SemaResult<bool> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ============ 作用域 ============

    /// 进入程序/函数/过程自己的作用域
    fn enter_scope_of(&mut self, owner: ObjectId) {
        if let Some(scope) = self.table.object(owner).own_scope() {
            self.table.enter_scope(scope);
        }
    }

    // ============ 程序 ============

    /// Program ::= program ident ; Block .
    fn compile_program(&mut self) -> SemaResult<()> {
        self.expect(TokenKind::Program)?;
        let (name, _) = self.expect_ident()?;
        log::debug!("analyzing program '{}'", name);

        let program = self.table.create_program(&name);
        self.enter_scope_of(program);

        self.expect(TokenKind::Semicolon)?;
        self.compile_block()?;
        self.expect(TokenKind::Period)?;

        self.table.exit_scope();
        Ok(())
    }
}
