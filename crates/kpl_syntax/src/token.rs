use kpl_diagnostics::Position;
use logos::{FilterResult, Logos};
use std::fmt;

/// 终结符类别
///
/// 关键字不区分大小写；标识符保留原样（查找时区分大小写）。
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // --- 关键字 (Keywords) ---
    #[token("program", ignore(ascii_case))]
    Program,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("type", ignore(ascii_case))]
    Type,
    #[token("var", ignore(ascii_case))]
    Var,
    #[token("integer", ignore(ascii_case))]
    Integer,
    #[token("char", ignore(ascii_case))]
    Char,
    #[token("array", ignore(ascii_case))]
    Array,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    #[token("begin", ignore(ascii_case))]
    Begin,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("call", ignore(ascii_case))]
    Call,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("while", ignore(ascii_case))]
    While,
    #[token("do", ignore(ascii_case))]
    Do,
    #[token("for", ignore(ascii_case))]
    For,
    #[token("to", ignore(ascii_case))]
    To,
    #[token("sum", ignore(ascii_case))]
    Sum,

    // --- 符号 (Symbols) ---
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Period,
    #[token(",")]
    Comma,
    #[token(":=")]
    Assign,
    #[token("=")]
    Eq,
    #[token("<>")]
    #[token("!=")]
    Neq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Times,
    #[token("/")]
    Slash,
    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    // 数组下标：[ ] 以及经典写法 (. .)
    #[token("[")]
    #[token("(.")]
    LSel,
    #[token("]")]
    #[token(".)")]
    RSel,

    // --- 复杂数据 (Data) ---
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+")]
    Number,
    #[regex(r"'[^'\n]'")]
    CharLiteral,

    // (* ... *) 注释，未闭合时报错
    #[token("(*", skip_comment)]
    Comment,

    Eof,
}

fn skip_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), ()> {
    match lex.remainder().find("*)") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

impl TokenKind {
    /// 经典 KPL 扫描器的记号名，用于 `kplc tokens`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Program => "KW_PROGRAM",
            Self::Const => "KW_CONST",
            Self::Type => "KW_TYPE",
            Self::Var => "KW_VAR",
            Self::Integer => "KW_INTEGER",
            Self::Char => "KW_CHAR",
            Self::Array => "KW_ARRAY",
            Self::Of => "KW_OF",
            Self::Function => "KW_FUNCTION",
            Self::Procedure => "KW_PROCEDURE",
            Self::Begin => "KW_BEGIN",
            Self::End => "KW_END",
            Self::Call => "KW_CALL",
            Self::If => "KW_IF",
            Self::Then => "KW_THEN",
            Self::Else => "KW_ELSE",
            Self::While => "KW_WHILE",
            Self::Do => "KW_DO",
            Self::For => "KW_FOR",
            Self::To => "KW_TO",
            Self::Sum => "KW_SUM",
            Self::Semicolon => "SB_SEMICOLON",
            Self::Colon => "SB_COLON",
            Self::Period => "SB_PERIOD",
            Self::Comma => "SB_COMMA",
            Self::Assign => "SB_ASSIGN",
            Self::Eq => "SB_EQ",
            Self::Neq => "SB_NEQ",
            Self::Lt => "SB_LT",
            Self::Le => "SB_LE",
            Self::Gt => "SB_GT",
            Self::Ge => "SB_GE",
            Self::Plus => "SB_PLUS",
            Self::Minus => "SB_MINUS",
            Self::Times => "SB_TIMES",
            Self::Slash => "SB_SLASH",
            Self::LPar => "SB_LPAR",
            Self::RPar => "SB_RPAR",
            Self::LSel => "SB_LSEL",
            Self::RSel => "SB_RSEL",
            Self::Ident => "TK_IDENT",
            Self::Number => "TK_NUMBER",
            Self::CharLiteral => "TK_CHAR",
            Self::Comment => "TK_COMMENT",
            Self::Eof => "TK_EOF",
        }
    }
}

// 诊断中使用的可读名称: "';'", "identifier"
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Program => "'program'",
            Self::Const => "'const'",
            Self::Type => "'type'",
            Self::Var => "'var'",
            Self::Integer => "'integer'",
            Self::Char => "'char'",
            Self::Array => "'array'",
            Self::Of => "'of'",
            Self::Function => "'function'",
            Self::Procedure => "'procedure'",
            Self::Begin => "'begin'",
            Self::End => "'end'",
            Self::Call => "'call'",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Do => "'do'",
            Self::For => "'for'",
            Self::To => "'to'",
            Self::Sum => "'sum'",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::Period => "'.'",
            Self::Comma => "','",
            Self::Assign => "':='",
            Self::Eq => "'='",
            Self::Neq => "'<>'",
            Self::Lt => "'<'",
            Self::Le => "'<='",
            Self::Gt => "'>'",
            Self::Ge => "'>='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Times => "'*'",
            Self::Slash => "'/'",
            Self::LPar => "'('",
            Self::RPar => "')'",
            Self::LSel => "'['",
            Self::RSel => "']'",
            Self::Ident => "identifier",
            Self::Number => "number",
            Self::CharLiteral => "char constant",
            Self::Comment => "comment",
            Self::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// 记号附带的数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Ident(String),
    Number(i64),
    Char(char),
}

/// 扫描器产出的记号：类别 + 数据 + 位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: Payload,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, payload: Payload, pos: Position) -> Self {
        Self { kind, payload, pos }
    }

    /// 输入结束记号
    pub fn eof(pos: Position) -> Self {
        Self::new(TokenKind::Eof, Payload::None, pos)
    }

    /// 标识符文本
    pub fn ident(&self) -> Option<&str> {
        match &self.payload {
            Payload::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// 数字字面量的值
    pub fn number(&self) -> Option<i64> {
        match self.payload {
            Payload::Number(n) => Some(n),
            _ => None,
        }
    }

    /// 字符字面量的值
    pub fn char_value(&self) -> Option<char> {
        match self.payload {
            Payload::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:", self.pos.line, self.pos.column)?;
        match &self.payload {
            Payload::None => write!(f, "{}", self.kind.code()),
            Payload::Ident(name) => write!(f, "{}({})", self.kind.code(), name),
            Payload::Number(n) => write!(f, "{}({})", self.kind.code(), n),
            Payload::Char(c) => write!(f, "{}('{}')", self.kind.code(), c),
        }
    }
}
