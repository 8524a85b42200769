//! Token Source
//!
//! 语法/语义分析器只依赖这个接口按需拉取记号。

use crate::lexer::LexError;
use crate::token::Token;

/// 按需产出记号的来源
///
/// 输入结束后必须持续返回 [`TokenKind::Eof`](crate::TokenKind::Eof) 记号。
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Token, LexError> {
        (**self).next_token()
    }
}
