//! Parse and scan a realistic Go file from disk.

use goa_ir::{Field, TypeExpr};
use goa_parser::{parse_source, scan_exports};

fn fixture() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/service.go");
    std::fs::read_to_string(path).expect("read fixture")
}

#[test]
fn parses_every_function() {
    let file = parse_source(&fixture()).unwrap();
    assert_eq!(file.package, "service");
    let names: Vec<_> = file.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Ping", "Batch", "Concat", "helper"]);
}

#[test]
fn scans_marked_functions_in_order() {
    let file = parse_source(&fixture()).unwrap();
    let exports = scan_exports(&file).unwrap();
    let names: Vec<_> = exports.iter().map(|e| e.exported_name.as_str()).collect();
    assert_eq!(names, vec!["Ping", "Batch", "Concat"]);

    let concat = &exports[2];
    assert_eq!(
        concat.params.fields,
        vec![
            Field::named(&["a", "b"], TypeExpr::ident("string")),
            Field::named(&["sep"], TypeExpr::ident("rune")),
        ]
    );
    assert_eq!(concat.results.arity(), 2);
}

#[test]
fn doc_group_with_blank_comment_line_still_attaches() {
    let file = parse_source(&fixture()).unwrap();
    let ping = &file.funcs[0];
    let doc = ping.doc.as_ref().expect("Ping doc");
    assert_eq!(doc.list.len(), 3);
}
