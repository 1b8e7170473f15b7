//! Export scanner.
//!
//! Selects functions whose doc comment carries a `goa-export <Name>` line.

use goa_ir::{ExportDecl, SourceFile, EXPORT_MARKER};
use tracing::debug;

use crate::error::ScanError;

/// Collect export declarations from a parsed file, in declaration order.
///
/// Every matching comment line yields its own `ExportDecl`, so a function
/// with two markers is exported twice. Names are not deduplicated.
/// A marker on a method stops the scan with `ScanError::MethodExport`.
pub fn scan_exports(file: &SourceFile) -> Result<Vec<ExportDecl>, ScanError> {
    let mut exports = Vec::new();

    for func in &file.funcs {
        let Some(doc) = &func.doc else {
            continue;
        };
        for line in doc.lines() {
            let Some(rest) = line.strip_prefix(EXPORT_MARKER) else {
                continue;
            };
            if let Some(receiver) = func.receiver.as_ref().filter(|_| func.is_method()) {
                return Err(ScanError::MethodExport {
                    function: func.name.clone(),
                    receiver: receiver.to_string(),
                    line: func.line,
                });
            }
            let exported_name = rest.trim();
            if exported_name.is_empty() {
                return Err(ScanError::EmptyExportName {
                    function: func.name.clone(),
                    line: func.line,
                });
            }
            debug!(function = %func.name, export = exported_name, "found export marker");
            exports.push(ExportDecl {
                source_name: func.name.clone(),
                exported_name: exported_name.to_string(),
                params: func.params.clone(),
                results: func.results.clone(),
                line: func.line,
            });
        }
    }

    Ok(exports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;

    fn scan(src: &str) -> Result<Vec<ExportDecl>, ScanError> {
        scan_exports(&parse_source(src).expect("parse failed"))
    }

    #[test]
    fn unmarked_functions_are_skipped() {
        let exports = scan("package p\n// Helper does things.\nfunc Helper() {}\nfunc Bare() {}\n").unwrap();
        assert!(exports.is_empty());
    }

    #[test]
    fn one_marker_among_other_lines() {
        let exports = scan(
            "package p\n// Ping answers.\n// goa-export Ping\n// See also Pong.\nfunc ping(count int) (int, error) { return count, nil }\n",
        )
        .unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].source_name, "ping");
        assert_eq!(exports[0].exported_name, "Ping");
        assert_eq!(exports[0].params.arity(), 1);
        assert_eq!(exports[0].results.arity(), 2);
    }

    #[test]
    fn file_with_byte_order_mark() {
        let exports = scan("\u{feff}package p\n// goa-export Ping\nfunc Ping() {}\n").unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].exported_name, "Ping");
        assert_eq!(exports[0].line, 3);
    }

    #[test]
    fn duplicate_markers_yield_duplicate_records() {
        let exports = scan("package p\n// goa-export Ping\n// goa-export Ping\nfunc Ping() {}\n").unwrap();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0], exports[1]);
    }

    #[test]
    fn declaration_order_preserved() {
        let exports = scan(
            "package p\n// goa-export B\nfunc b() {}\n\n// goa-export A\nfunc a() {}\n",
        )
        .unwrap();
        let names: Vec<_> = exports.iter().map(|e| e.exported_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn marker_inside_block_comment() {
        let exports = scan("package p\n/*\n * Sum adds.\n * goa-export Sum\n */\nfunc Sum(a, b int) int { return a + b }\n").unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].exported_name, "Sum");
    }

    #[test]
    fn marker_whitespace_is_trimmed() {
        let exports = scan("package p\n//goa-export   Ping  \nfunc Ping() {}\n").unwrap();
        assert_eq!(exports[0].exported_name, "Ping");
    }

    #[test]
    fn method_with_marker_is_rejected() {
        let err = scan(
            "package p\n// goa-export Ok\nfunc Ok() {}\n// goa-export Serve\nfunc (s *Server) Serve() {}\n",
        )
        .unwrap_err();
        match &err {
            ScanError::MethodExport {
                function, receiver, ..
            } => {
                assert_eq!(function, "Serve");
                assert_eq!(receiver, "(s *Server)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("methods cannot be exported"));
    }

    #[test]
    fn method_without_marker_is_fine() {
        let exports = scan("package p\n// String formats.\nfunc (s *Server) String() string { return \"\" }\n").unwrap();
        assert!(exports.is_empty());
    }

    #[test]
    fn empty_export_name_is_rejected() {
        let err = scan("package p\n// goa-export\nfunc Ping() {}\n").unwrap_err();
        assert_eq!(
            err,
            ScanError::EmptyExportName {
                function: "Ping".into(),
                line: 3
            }
        );
    }
}
