//! Go lexer.
//!
//! Produces the token stream the declaration parser needs, with Go's
//! automatic semicolon insertion applied. Comments are kept out of the
//! token stream and returned separately, each tagged with the index of the
//! token that follows it so the parser can find doc comments.

use goa_ir::Comment;

use crate::error::ParseError;

/// Go keywords. Identifiers in this list are never type names or field names.
pub const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

const OPERATOR_CHARS: &str = "+-*/%&|^<>=!()[]{},;.:~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident,
    Number,
    String,
    Rune,
    /// Operator or delimiter, including `;`.
    Punct,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == kw
    }

    /// Identifier that is not a keyword.
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Ident && !KEYWORDS.contains(&self.text.as_str())
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "EOF".to_string(),
            TokenKind::Punct if self.text == "\n" => "newline".to_string(),
            _ => format!("'{}'", self.text),
        }
    }

    fn ends_statement(&self) -> bool {
        match self.kind {
            TokenKind::Ident => {
                self.is_name()
                    || matches!(
                        self.text.as_str(),
                        "break" | "continue" | "fallthrough" | "return"
                    )
            }
            TokenKind::Number | TokenKind::String | TokenKind::Rune => true,
            TokenKind::Punct => matches!(self.text.as_str(), ")" | "]" | "}" | "++" | "--"),
            TokenKind::Eof => false,
        }
    }
}

/// A comment plus where it sits relative to the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedComment {
    pub comment: Comment,
    /// Index of the first token after the comment.
    pub next_token: usize,
    /// The comment follows a token on the same line.
    pub trailing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<LexedComment>,
}

/// Tokenize Go source.
pub fn lex(source: &str) -> Result<Lexed, ParseError> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    out: Lexed,
    pending_semi: bool,
    /// Line of the last real (not auto-inserted) token.
    last_token_line: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        // A leading byte order mark is not part of the source.
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            out: Lexed::default(),
            pending_semi: false,
            last_token_line: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(line, column, message)
    }

    fn push(&mut self, kind: TokenKind, text: String, line: usize, column: usize) {
        let token = Token {
            kind,
            text,
            line,
            column,
        };
        self.pending_semi = token.ends_statement();
        self.last_token_line = line;
        self.out.tokens.push(token);
    }

    fn insert_semi(&mut self, line: usize, column: usize) {
        if self.pending_semi {
            self.out.tokens.push(Token {
                kind: TokenKind::Punct,
                text: "\n".to_string(),
                line,
                column,
            });
            self.pending_semi = false;
        }
    }

    fn run(mut self) -> Result<Lexed, ParseError> {
        loop {
            while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
                self.bump();
            }
            let (line, column) = (self.line, self.column);
            let Some(c) = self.peek() else {
                self.insert_semi(line, column);
                self.out.tokens.push(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line,
                    column,
                });
                return Ok(self.out);
            };

            match c {
                '\n' => {
                    self.insert_semi(line, column);
                    self.bump();
                }
                '/' if self.peek_at(1) == Some('/') => {
                    self.insert_semi(line, column);
                    let mut text = String::new();
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        text.push(c);
                        self.bump();
                    }
                    self.record_comment(text, line, line);
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let mut text = String::from("/*");
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek() {
                            None => return Err(self.error(line, column, "comment not terminated")),
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.bump();
                                self.bump();
                                text.push_str("*/");
                                break;
                            }
                            Some(c) => {
                                text.push(c);
                                self.bump();
                            }
                        }
                    }
                    let end_line = self.line;
                    if end_line > line {
                        self.insert_semi(line, column);
                    }
                    self.record_comment(text, line, end_line);
                }
                c if c.is_alphabetic() || c == '_' => {
                    let mut text = String::new();
                    while let Some(c) = self.peek() {
                        if !(c.is_alphanumeric() || c == '_') {
                            break;
                        }
                        text.push(c);
                        self.bump();
                    }
                    self.push(TokenKind::Ident, text, line, column);
                }
                c if c.is_ascii_digit()
                    || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) =>
                {
                    let text = self.number();
                    self.push(TokenKind::Number, text, line, column);
                }
                '"' => {
                    let text = self.quoted('"', "string literal not terminated")?;
                    self.push(TokenKind::String, text, line, column);
                }
                '\'' => {
                    let text = self.quoted('\'', "rune literal not terminated")?;
                    self.push(TokenKind::Rune, text, line, column);
                }
                '`' => {
                    let mut text = String::from("`");
                    self.bump();
                    loop {
                        match self.bump() {
                            None => {
                                return Err(self.error(line, column, "raw string literal not terminated"))
                            }
                            Some('`') => break,
                            Some(c) => text.push(c),
                        }
                    }
                    text.push('`');
                    self.push(TokenKind::String, text, line, column);
                }
                _ => {
                    let text = self.punct(line, column)?;
                    self.push(TokenKind::Punct, text, line, column);
                }
            }
        }
    }

    fn record_comment(&mut self, text: String, line: usize, end_line: usize) {
        let trailing = !self.out.tokens.is_empty() && self.last_token_line == line;
        self.out.comments.push(LexedComment {
            comment: Comment {
                text,
                line,
                end_line,
            },
            next_token: self.out.tokens.len(),
            trailing,
        });
    }

    fn number(&mut self) -> String {
        let mut text = String::new();
        let is_hex = self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-')
                && match text.chars().last() {
                    Some('e' | 'E') => !is_hex,
                    Some('p' | 'P') => is_hex,
                    _ => false,
                };
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    fn quoted(&mut self, quote: char, unterminated: &str) -> Result<String, ParseError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        if let Some(open) = self.bump() {
            text.push(open);
        }
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error(line, column, unterminated)),
                Some('\\') => {
                    text.push('\\');
                    self.bump();
                    match self.peek() {
                        None | Some('\n') => return Err(self.error(line, column, unterminated)),
                        Some(c) => {
                            text.push(c);
                            self.bump();
                        }
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                    if c == quote {
                        return Ok(text);
                    }
                }
            }
        }
    }

    fn punct(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let c = self.peek().unwrap_or_default();
        let next = self.peek_at(1);
        let text = match (c, next) {
            ('.', Some('.')) if self.peek_at(2) == Some('.') => "...",
            ('<', Some('-')) => "<-",
            ('+', Some('+')) => "++",
            ('-', Some('-')) => "--",
            _ if OPERATOR_CHARS.contains(c) => {
                self.bump();
                return Ok(c.to_string());
            }
            _ => return Err(self.error(line, column, format!("invalid character {:?}", c))),
        };
        for _ in 0..text.chars().count() {
            self.bump();
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        lex(source)
            .unwrap()
            .tokens
            .into_iter()
            .map(|t| match t.kind {
                TokenKind::Eof => "EOF".to_string(),
                TokenKind::Punct if t.text == "\n" => ";".to_string(),
                _ => t.text,
            })
            .collect()
    }

    #[test]
    fn inserts_semicolons_after_line_ends() {
        assert_eq!(
            texts("package main\nfunc f() {\n\treturn\n}\n"),
            vec!["package", "main", ";", "func", "f", "(", ")", "{", "return", ";", "}", ";", "EOF"]
        );
    }

    #[test]
    fn no_semicolon_after_operator_or_comma() {
        assert_eq!(
            texts("f(a,\n b)"),
            vec!["f", "(", "a", ",", "b", ")", ";", "EOF"]
        );
    }

    #[test]
    fn keyword_does_not_end_statement() {
        assert_eq!(texts("func\n"), vec!["func", "EOF"]);
        assert_eq!(texts("break\n"), vec!["break", ";", "EOF"]);
    }

    #[test]
    fn multi_char_punctuation() {
        assert_eq!(
            texts("x ...int <-ch i++"),
            vec!["x", "...", "int", "<-", "ch", "i", "++", ";", "EOF"]
        );
    }

    #[test]
    fn literals() {
        assert_eq!(
            texts(r#"a := "x\"y" + 'c' + `raw
line` + 0x1F + 1.5e+3"#),
            vec!["a", ":", "=", "\"x\\\"y\"", "+", "'c'", "+", "`raw\nline`", "+", "0x1F", "+", "1.5e+3", ";", "EOF"]
        );
    }

    #[test]
    fn comments_are_separate_and_positioned() {
        let lexed = lex("package p\n\n// one\n// two\nfunc f()\n").unwrap();
        assert_eq!(lexed.comments.len(), 2);
        let first = &lexed.comments[0];
        assert_eq!(first.comment.text, "// one");
        assert_eq!(first.comment.line, 3);
        assert!(!first.trailing);
        assert!(lexed.tokens[first.next_token].is_keyword("func"));
    }

    #[test]
    fn trailing_comment_inserts_semicolon_first() {
        let lexed = lex("x // note\ny").unwrap();
        let c = &lexed.comments[0];
        assert!(c.trailing);
        assert_eq!(lexed.tokens[c.next_token].text, "y");
        assert_eq!(lexed.tokens[1].text, "\n");
    }

    #[test]
    fn block_comment_spanning_lines_acts_as_newline() {
        let lexed = lex("x /* a\nb */ y").unwrap();
        assert_eq!(lexed.tokens[1].text, "\n");
        assert_eq!(lexed.comments[0].comment.end_line, 2);
    }

    #[test]
    fn unterminated_string_reports_position() {
        let err = lex("package p\nvar s = \"abc\n").unwrap_err();
        assert_eq!((err.line, err.column), (2, 9));
        assert!(err.message.contains("not terminated"));
    }

    #[test]
    fn unterminated_block_comment() {
        let err = lex("/* never closed").unwrap_err();
        assert_eq!(err.message, "comment not terminated");
    }

    #[test]
    fn leading_byte_order_mark_is_skipped() {
        let lexed = lex("\u{feff}package p\n").unwrap();
        assert_eq!(lexed.tokens[0].text, "package");
        assert_eq!((lexed.tokens[0].line, lexed.tokens[0].column), (1, 1));
        assert_eq!(texts("\u{feff}package p\n"), texts("package p\n"));
    }

    #[test]
    fn byte_order_mark_after_start_is_invalid() {
        let err = lex("package p\n\u{feff}").unwrap_err();
        assert_eq!((err.line, err.column), (2, 1));
    }

    #[test]
    fn invalid_character() {
        let err = lex("package p\n#").unwrap_err();
        assert_eq!((err.line, err.column), (2, 1));
    }
}
