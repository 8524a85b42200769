//! KPL Syntax
//!
//! KPL 的记号定义与扫描器。分析器通过 [`TokenSource`] 按需拉取记号，
//! 不会一次性物化整个记号序列。

pub mod lexer;
pub mod stream;
pub mod token;

pub use lexer::{tokenize, LexError, Lexer, MAX_IDENT_LEN};
pub use stream::TokenSource;
pub use token::{Payload, Token, TokenKind};

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use logos::Logos;

    #[test]
    fn test_lexer_basic() {
        let code = "x := 10 + y;";
        let mut lexer = TokenKind::lexer(code);

        assert_eq!(lexer.next(), Some(Ok(TokenKind::Ident)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Assign)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Number)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Plus)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Ident)));
        assert_eq!(lexer.next(), Some(Ok(TokenKind::Semicolon)));
        assert_eq!(lexer.next(), None);
    }
}
