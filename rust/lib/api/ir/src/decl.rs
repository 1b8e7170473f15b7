//! Declaration IR — what the parser keeps from a Go source file.
//!
//! Only function declarations matter for export scanning; everything else
//! at the top level is skipped by the parser.

use serde::{Deserialize, Serialize};

use crate::types::FieldList;

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Name from the `package` clause.
    pub package: String,

    /// Top-level function declarations, in source order.
    pub funcs: Vec<FuncDecl>,
}

/// A top-level `func` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Function name.
    pub name: String,

    /// Receiver list for methods (`func (s *Server) Name(...)`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<FieldList>,

    pub params: FieldList,

    pub results: FieldList,

    /// Doc comment group attached to the declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<CommentGroup>,

    /// 1-based line of the `func` keyword.
    pub line: usize,
}

impl FuncDecl {
    /// A method is a function with a non-empty receiver.
    pub fn is_method(&self) -> bool {
        self.receiver.as_ref().is_some_and(|r| !r.is_empty())
    }
}

/// A run of adjacent comments with no blank line or token between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Iterate every text line of every comment, delimiters removed and trimmed.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.list.iter().flat_map(Comment::lines)
    }
}

/// A single `//` or `/* */` comment, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,

    /// 1-based first line.
    pub line: usize,

    /// 1-based last line (differs from `line` only for block comments).
    pub end_line: usize,
}

impl Comment {
    pub fn is_block(&self) -> bool {
        self.text.starts_with("/*")
    }

    /// Text lines with comment delimiters and surrounding whitespace stripped.
    ///
    /// A line comment yields one line. A block comment yields one entry per
    /// source line, with a leading `*` decoration removed.
    pub fn lines(&self) -> Vec<String> {
        if !self.is_block() {
            let body = self.text.trim_matches(|c: char| c == '/' || c.is_whitespace());
            return vec![body.to_string()];
        }
        let body = self
            .text
            .strip_prefix("/*")
            .and_then(|b| b.strip_suffix("*/"))
            .unwrap_or(&self.text);
        body.lines()
            .map(|line| {
                let line = line.trim();
                line.strip_prefix('*').unwrap_or(line).trim().to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            text: text.to_string(),
            line: 1,
            end_line: 1 + text.matches('\n').count(),
        }
    }

    #[test]
    fn line_comment_is_trimmed() {
        assert_eq!(comment("//   goa-export Ping\t").lines(), vec!["goa-export Ping"]);
    }

    #[test]
    fn block_comment_splits_lines() {
        let c = comment("/*\n * Ping does things.\n * goa-export Ping\n */");
        assert!(c.is_block());
        assert_eq!(c.lines(), vec!["", "Ping does things.", "goa-export Ping", ""]);
    }

    #[test]
    fn single_line_block_comment() {
        assert_eq!(comment("/* goa-export Ping */").lines(), vec!["goa-export Ping"]);
    }

    #[test]
    fn method_detection() {
        let mut f = FuncDecl {
            name: "Ping".into(),
            receiver: None,
            params: FieldList::default(),
            results: FieldList::default(),
            doc: None,
            line: 1,
        };
        assert!(!f.is_method());
        f.receiver = Some(FieldList::default());
        assert!(!f.is_method());
    }
}
