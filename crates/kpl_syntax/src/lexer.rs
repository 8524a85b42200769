//! Lexer - 词法分析
//!
//! 在 logos 生成的状态机之上补充 KPL 扫描器的约定：
//! 行列位置、标识符长度限制、字面量数据以及词法错误分类。

use crate::stream::TokenSource;
use crate::token::{Payload, Token, TokenKind};
use kpl_diagnostics::Position;
use logos::Logos;
use thiserror::Error;

/// 标识符的最大长度
pub const MAX_IDENT_LEN: usize = 15;

/// 词法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("invalid symbol '{symbol}'")]
    InvalidSymbol { symbol: char, pos: Position },

    #[error("invalid char constant")]
    InvalidCharConstant { pos: Position },

    #[error("end of comment expected")]
    EndOfComment { pos: Position },

    #[error("identifier '{name}' is too long (at most {} characters)", MAX_IDENT_LEN)]
    IdentTooLong { name: String, pos: Position },

    #[error("number '{digits}' is too large")]
    NumberTooLarge { digits: String, pos: Position },
}

impl LexError {
    /// 获取错误发生的位置
    pub fn position(&self) -> Position {
        match self {
            Self::InvalidSymbol { pos, .. } => *pos,
            Self::InvalidCharConstant { pos } => *pos,
            Self::EndOfComment { pos } => *pos,
            Self::IdentTooLong { pos, .. } => *pos,
            Self::NumberTooLarge { pos, .. } => *pos,
        }
    }
}

/// 字节偏移 -> (行, 列) 的换算表
#[derive(Debug)]
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    fn position(&self, source: &str, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = source[self.line_starts[line]..offset].chars().count() + 1;
        Position::new(line + 1, column)
    }
}

/// KPL 扫描器
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    lines: LineIndex,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
        }
    }

    fn position_at(&self, offset: usize) -> Position {
        self.lines.position(self.source, offset)
    }

    /// 把 logos 的失败归类为具体的词法错误
    fn classify_error(&self, pos: Position) -> LexError {
        let slice = self.inner.slice();
        if slice.starts_with("(*") {
            LexError::EndOfComment { pos }
        } else if slice.starts_with('\'') {
            LexError::InvalidCharConstant { pos }
        } else {
            LexError::InvalidSymbol {
                symbol: slice.chars().next().unwrap_or('\0'),
                pos,
            }
        }
    }

    /// 为成功识别的记号附加数据
    fn make_token(&self, kind: TokenKind, pos: Position) -> Result<Token, LexError> {
        let slice = self.inner.slice();
        let payload = match kind {
            TokenKind::Ident => {
                if slice.chars().count() > MAX_IDENT_LEN {
                    return Err(LexError::IdentTooLong {
                        name: slice.to_string(),
                        pos,
                    });
                }
                Payload::Ident(slice.to_string())
            }
            TokenKind::Number => match slice.parse::<i64>() {
                Ok(n) => Payload::Number(n),
                Err(_) => {
                    return Err(LexError::NumberTooLarge {
                        digits: slice.to_string(),
                        pos,
                    })
                }
            },
            TokenKind::CharLiteral => match slice.chars().nth(1) {
                Some(c) => Payload::Char(c),
                None => return Err(LexError::InvalidCharConstant { pos }),
            },
            _ => Payload::None,
        };
        Ok(Token::new(kind, payload, pos))
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        match self.inner.next() {
            Some(Ok(kind)) => {
                let pos = self.position_at(self.inner.span().start);
                self.make_token(kind, pos)
            }
            Some(Err(())) => {
                let pos = self.position_at(self.inner.span().start);
                Err(self.classify_error(pos))
            }
            None => Ok(Token::eof(self.position_at(self.source.len()))),
        }
    }
}

/// 扫描整个源码，直到 (并包含) 输入结束记号
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source should scan")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("PROGRAM Begin end"),
            vec![
                TokenKind::Program,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_identifier_payload_keeps_spelling() {
        let tokens = tokenize("WriteLn beginning").unwrap();
        assert_eq!(tokens[0].ident(), Some("WriteLn"));
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].ident(), Some("beginning"));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds(":= : <> != <= < >= > (. .) [ ] ( )"),
            vec![
                TokenKind::Assign,
                TokenKind::Colon,
                TokenKind::Neq,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::Ge,
                TokenKind::Gt,
                TokenKind::LSel,
                TokenKind::RSel,
                TokenKind::LSel,
                TokenKind::RSel,
                TokenKind::LPar,
                TokenKind::RPar,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = tokenize("42 'x'").unwrap();
        assert_eq!(tokens[0].number(), Some(42));
        assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[1].char_value(), Some('x'));
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = tokenize("program p;\n  begin").unwrap();
        assert_eq!(tokens[0].pos, Position::new(1, 1));
        assert_eq!(tokens[1].pos, Position::new(1, 9));
        assert_eq!(tokens[2].pos, Position::new(1, 10));
        assert_eq!(tokens[3].pos, Position::new(2, 3));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("begin (* a * comment ) *) end"),
            vec![TokenKind::Begin, TokenKind::End, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("begin (* never closed").unwrap_err();
        assert_eq!(
            err,
            LexError::EndOfComment {
                pos: Position::new(1, 7)
            }
        );
    }

    #[test]
    fn test_invalid_symbol() {
        let err = tokenize("x := 1 # 2").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidSymbol {
                symbol: '#',
                pos: Position::new(1, 8)
            }
        );
    }

    #[test]
    fn test_invalid_char_constant() {
        let err = tokenize("c := 'ab'").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharConstant { .. }));
    }

    #[test]
    fn test_ident_too_long() {
        let err = tokenize("abcdefghijklmnop").unwrap_err();
        assert!(matches!(err, LexError::IdentTooLong { ref name, .. } if name == "abcdefghijklmnop"));
        assert!(tokenize("abcdefghijklmno").is_ok());
    }

    #[test]
    fn test_number_too_large() {
        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(matches!(err, LexError::NumberTooLarge { .. }));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("end");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_token_display() {
        let tokens = tokenize("x 7").unwrap();
        assert_eq!(tokens[0].to_string(), "1-1:TK_IDENT(x)");
        assert_eq!(tokens[1].to_string(), "1-3:TK_NUMBER(7)");
    }
}
