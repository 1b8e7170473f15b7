//! Parser for Go top-level declarations.
//!
//! Reads a whole Go source file and produces a `SourceFile` holding the
//! package name and every top-level `func` declaration with its signature
//! and doc comment group. `import`, `const`, `var` and `type` declarations
//! are skipped; function bodies are skipped by bracket balancing.

use goa_ir::{ChanDir, CommentGroup, Field, FieldList, FuncDecl, SourceFile, TypeExpr};
use tracing::debug;

use crate::error::ParseError;
use crate::lexer::{self, LexedComment, Token, TokenKind};

/// Parse Go source text into a `SourceFile`.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let lexed = lexer::lex(source)?;
    let mut parser = Parser {
        tokens: lexed.tokens,
        comments: lexed.comments,
        pos: 0,
    };
    let file = parser.parse_file()?;
    debug!(package = %file.package, funcs = file.funcs.len(), "parsed Go source");
    Ok(file)
}

/// One comma-separated entry of a parameter list, before grouping.
enum ParamItem {
    /// A lone identifier: a name in a named list, a type otherwise.
    Bare(String),
    Named(String, TypeExpr),
    Type(TypeExpr, usize, usize),
}

struct Parser {
    tokens: Vec<Token>,
    comments: Vec<LexedComment>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !tok.is_eof() {
            self.pos += 1;
        }
        tok
    }

    fn error_at(tok: &Token, message: impl Into<String>) -> ParseError {
        ParseError::new(tok.line, tok.column, message)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        Self::error_at(tok, format!("expected {}, found {}", expected, tok.describe()))
    }

    fn is_semi(tok: &Token) -> bool {
        tok.is_punct(";") || tok.is_punct("\n")
    }

    fn expect_punct(&mut self, p: &str) -> Result<Token, ParseError> {
        if self.peek().is_punct(p) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", p)))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        if self.peek().is_name() {
            Ok(self.advance().text)
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn expect_semi(&mut self) -> Result<(), ParseError> {
        let tok = self.peek();
        if Self::is_semi(tok) {
            self.advance();
            Ok(())
        } else if tok.is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("';' or newline"))
        }
    }

    fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        if !self.peek().is_keyword("package") {
            return Err(self.unexpected("'package'"));
        }
        self.advance();
        let package = self.expect_name()?;
        self.expect_semi()?;

        let mut funcs = Vec::new();
        loop {
            let tok = self.peek().clone();
            if tok.is_eof() {
                break;
            }
            if Self::is_semi(&tok) {
                self.advance();
                continue;
            }
            match tok.text.as_str() {
                "func" if tok.kind == TokenKind::Ident => funcs.push(self.parse_func()?),
                "import" | "const" | "var" | "type" if tok.kind == TokenKind::Ident => {
                    self.skip_decl()?
                }
                _ => {
                    return Err(Self::error_at(
                        &tok,
                        format!("non-declaration statement outside function body: {}", tok.describe()),
                    ))
                }
            }
        }

        Ok(SourceFile { package, funcs })
    }

    /// Skip a non-function declaration up to its terminating semicolon.
    fn skip_decl(&mut self) -> Result<(), ParseError> {
        self.advance();
        let mut depth = 0usize;
        loop {
            let tok = self.peek();
            if tok.is_eof() {
                if depth > 0 {
                    return Err(Self::error_at(tok, "unexpected EOF in declaration"));
                }
                return Ok(());
            }
            if depth == 0 && Self::is_semi(tok) {
                return Ok(());
            }
            if tok.kind == TokenKind::Punct {
                match tok.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            return Err(Self::error_at(tok, format!("unexpected {}", tok.describe())));
                        }
                        depth -= 1;
                    }
                    _ => {}
                }
            }
            self.advance();
        }
    }

    /// Skip a bracketed region starting at the current opening bracket.
    /// Returns the inner tokens' text joined by spaces.
    fn skip_balanced(&mut self) -> Result<String, ParseError> {
        let open = self.advance();
        let mut depth = 1usize;
        let mut inner: Vec<String> = Vec::new();
        loop {
            let tok = self.advance();
            if tok.is_eof() {
                return Err(Self::error_at(
                    &tok,
                    format!("unexpected EOF, unclosed '{}' opened at {}:{}", open.text, open.line, open.column),
                ));
            }
            if tok.kind == TokenKind::Punct {
                match tok.text.as_str() {
                    "(" | "[" | "{" => depth += 1,
                    ")" | "]" | "}" => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(inner.join(" "));
                        }
                    }
                    "\n" => continue,
                    _ => {}
                }
            }
            inner.push(tok.text);
        }
    }

    fn parse_func(&mut self) -> Result<FuncDecl, ParseError> {
        let func_index = self.pos;
        let func_tok = self.advance();

        let receiver = if self.peek().is_punct("(") {
            Some(self.parse_params()?)
        } else {
            None
        };
        let name = self.expect_name()?;
        if self.peek().is_punct("[") {
            // Type parameters play no part in the exported signature.
            self.skip_balanced()?;
        }
        let params = self.parse_params()?;
        let results = self.parse_results()?;
        if self.peek().is_punct("{") {
            self.skip_balanced()?;
        }
        self.expect_semi()?;

        Ok(FuncDecl {
            name,
            receiver,
            params,
            results,
            doc: self.doc_comment(func_index, func_tok.line),
            line: func_tok.line,
        })
    }

    /// The comment group directly above the token at `index`, if any.
    fn doc_comment(&self, index: usize, line: usize) -> Option<CommentGroup> {
        let mut groups: Vec<(bool, CommentGroup)> = Vec::new();
        for lc in self.comments.iter().filter(|c| c.next_token == index) {
            let joins = match groups.last() {
                Some((trailing, group)) => {
                    let prev_end = group.list.last().map_or(0, |c| c.end_line);
                    if *trailing {
                        lc.comment.line == prev_end
                    } else {
                        lc.comment.line <= prev_end + 1
                    }
                }
                None => false,
            };
            if joins {
                if let Some((_, group)) = groups.last_mut() {
                    group.list.push(lc.comment.clone());
                }
                continue;
            }
            groups.push((
                lc.trailing,
                CommentGroup {
                    list: vec![lc.comment.clone()],
                },
            ));
        }
        let (trailing, group) = groups.pop()?;
        let end_line = group.list.last()?.end_line;
        if trailing || end_line + 1 != line {
            return None;
        }
        Some(group)
    }

    fn parse_results(&mut self) -> Result<FieldList, ParseError> {
        if self.peek().is_punct("(") {
            return self.parse_params();
        }
        if starts_type(self.peek()) {
            let ty = self.parse_type()?;
            return Ok(FieldList::new(vec![Field::anonymous(ty)]));
        }
        Ok(FieldList::default())
    }

    /// Parse a parenthesized parameter list, grouping names the way Go does:
    /// `(a, b int, c string)` is named, `(int, error)` is anonymous.
    fn parse_params(&mut self) -> Result<FieldList, ParseError> {
        self.expect_punct("(")?;
        let mut items = Vec::new();
        while !self.peek().is_punct(")") {
            items.push(self.parse_param_item()?);
            if self.peek().is_punct(",") {
                self.advance();
            } else if !self.peek().is_punct(")") {
                return Err(self.unexpected("',' or ')'"));
            }
        }
        let close = self.advance();

        let named = items.iter().any(|i| matches!(i, ParamItem::Named(..)));
        let mut fields = Vec::new();
        if named {
            let mut pending: Vec<String> = Vec::new();
            for item in items {
                match item {
                    ParamItem::Bare(name) => pending.push(name),
                    ParamItem::Named(name, ty) => {
                        pending.push(name);
                        fields.push(Field {
                            names: std::mem::take(&mut pending),
                            ty,
                        });
                    }
                    ParamItem::Type(_, line, column) => {
                        return Err(ParseError::new(
                            line,
                            column,
                            "mixed named and unnamed parameters",
                        ))
                    }
                }
            }
            if !pending.is_empty() {
                return Err(Self::error_at(
                    &close,
                    format!("missing type for parameter {}", pending.join(", ")),
                ));
            }
        } else {
            for item in items {
                let ty = match item {
                    ParamItem::Bare(name) => TypeExpr::Ident(name),
                    ParamItem::Type(ty, ..) => ty,
                    ParamItem::Named(..) => unreachable!("named items handled above"),
                };
                fields.push(Field::anonymous(ty));
            }
        }
        Ok(FieldList::new(fields))
    }

    fn parse_param_item(&mut self) -> Result<ParamItem, ParseError> {
        let tok = self.peek().clone();
        if tok.is_name() {
            let next = self.peek_at(1);
            if next.is_punct(",") || next.is_punct(")") {
                self.advance();
                return Ok(ParamItem::Bare(tok.text));
            }
            let named = if next.is_punct("[") {
                self.bracket_then_type(self.pos + 1)
            } else {
                next.is_punct("...") || (!next.is_punct(".") && starts_type(next))
            };
            if named {
                self.advance();
                let ty = self.parse_param_type()?;
                return Ok(ParamItem::Named(tok.text, ty));
            }
        }
        let ty = self.parse_param_type()?;
        Ok(ParamItem::Type(ty, tok.line, tok.column))
    }

    /// Whether the bracket at `open` is followed, after its match, by a type.
    /// Tells `a [4]int` (name + array) from `List[int]` (generic type).
    fn bracket_then_type(&self, open: usize) -> bool {
        let mut depth = 0usize;
        for (i, tok) in self.tokens.iter().enumerate().skip(open) {
            if tok.kind != TokenKind::Punct {
                if tok.is_eof() {
                    return false;
                }
                continue;
            }
            match tok.text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.tokens.get(i + 1).is_some_and(starts_type);
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn parse_param_type(&mut self) -> Result<TypeExpr, ParseError> {
        if self.peek().is_punct("...") {
            self.advance();
            return Ok(TypeExpr::Ellipsis(Box::new(self.parse_type()?)));
        }
        self.parse_type()
    }

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let tok = self.peek().clone();
        if tok.is_name() {
            self.advance();
            let base = if self.peek().is_punct(".") {
                self.advance();
                TypeExpr::Qualified {
                    package: tok.text,
                    name: self.expect_name()?,
                }
            } else {
                TypeExpr::Ident(tok.text)
            };
            if self.peek().is_punct("[") {
                self.advance();
                let mut args = vec![self.parse_type()?];
                while self.peek().is_punct(",") {
                    self.advance();
                    if self.peek().is_punct("]") {
                        break;
                    }
                    args.push(self.parse_type()?);
                }
                self.expect_punct("]")?;
                return Ok(TypeExpr::Generic {
                    base: Box::new(base),
                    args,
                });
            }
            return Ok(base);
        }

        match (tok.kind, tok.text.as_str()) {
            (TokenKind::Punct, "*") => {
                self.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            (TokenKind::Punct, "[") => {
                let len = if self.peek_at(1).is_punct("]") {
                    self.advance();
                    self.advance();
                    None
                } else {
                    Some(self.skip_balanced()?)
                };
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                })
            }
            (TokenKind::Punct, "(") => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect_punct(")")?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            (TokenKind::Punct, "<-") => {
                self.advance();
                if !self.peek().is_keyword("chan") {
                    return Err(self.unexpected("'chan'"));
                }
                self.advance();
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            (TokenKind::Ident, "map") => {
                self.advance();
                self.expect_punct("[")?;
                let key = self.parse_type()?;
                self.expect_punct("]")?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()?),
                })
            }
            (TokenKind::Ident, "chan") => {
                self.advance();
                let dir = if self.peek().is_punct("<-") {
                    self.advance();
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            (TokenKind::Ident, "func") => {
                self.advance();
                let params = self.parse_params()?;
                let results = self.parse_results()?;
                Ok(TypeExpr::Func { params, results })
            }
            (TokenKind::Ident, "struct") | (TokenKind::Ident, "interface") => {
                self.advance();
                if !self.peek().is_punct("{") {
                    return Err(self.unexpected("'{'"));
                }
                let body = self.skip_balanced()?;
                Ok(if tok.text == "struct" {
                    TypeExpr::Struct(body)
                } else {
                    TypeExpr::Interface(body)
                })
            }
            _ => Err(self.unexpected("type")),
        }
    }
}

/// Whether a token can begin a type expression.
fn starts_type(tok: &Token) -> bool {
    if tok.is_name() {
        return true;
    }
    match tok.kind {
        TokenKind::Ident => matches!(
            tok.text.as_str(),
            "func" | "map" | "chan" | "struct" | "interface"
        ),
        TokenKind::Punct => matches!(tok.text.as_str(), "*" | "[" | "(" | "<-"),
        _ => false,
    }
}
