/// End-to-end schema generation from Go source text

use goa_codegen_lib::*;
use goa_ir::{Cardinality, ExportRecord, SchemaType};

fn records(src: &str) -> Vec<ExportRecord> {
    let file = goa_parser::parse_source(src).unwrap();
    goa_parser::scan_exports(&file)
        .unwrap()
        .iter()
        .map(|decl| map_export(decl, &MapOptions::default()).unwrap())
        .collect()
}

fn render(src: &str) -> String {
    render_to_string(&ProtoGenerator::default(), &records(src)).unwrap()
}

/// Collapse whitespace so assertions only look at tokens.
fn tokens(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn ping_with_error_result() {
    let src = r#"
package rpc

// goa-export Ping
func Ping(count int) (int, error) {
	return count, nil
}
"#;
    let exports = records(src);
    assert_eq!(exports.len(), 1);
    let ping = &exports[0];
    assert_eq!(ping.params[0].schema_type, SchemaType::named("int64"));
    assert_eq!(ping.results[1].schema_type, SchemaType::Unsupported);

    let text = tokens(&render(src));
    assert!(text.contains(
        "message Ping_call { required int64 callid = 1; required int64 count = 2; }"
    ));
    assert!(text.contains(
        "message Ping_result { required int64 callid = 1; required int64 f_2 = 2; required <unsupported> f_3 = 3; }"
    ));
}

#[test]
fn batch_of_slices() {
    let src = r#"
package rpc

// goa-export Batch
func Batch(names []string) []int {
	return nil
}
"#;
    let exports = records(src);
    assert_eq!(exports[0].params[0].cardinality, Cardinality::Repeated);
    assert_eq!(exports[0].results[0].cardinality, Cardinality::Repeated);

    let text = tokens(&render(src));
    assert!(text.contains("message Batch_call { required int64 callid = 1; repeated string names = 2; }"));
    assert!(text.contains("message Batch_result { required int64 callid = 1; repeated int64 f_2 = 2; }"));
}

#[test]
fn unmarked_function_contributes_nothing() {
    let src = r#"
package rpc

func Hidden(x int) int { return x }

// goa-export Shown
func Shown() {}
"#;
    let text = render(src);
    assert!(!text.contains("Hidden"));
    assert_eq!(text.matches("message ").count(), 2);
    assert!(text.contains("message Shown_call {"));
}

#[test]
fn ids_are_contiguous_from_two() {
    let src = r#"
package rpc

// goa-export Wide
func Wide(a, b int, c string, d []bool, e *int) (x, y int, err error) { return }
"#;
    let exports = records(src);
    for list in [&exports[0].params, &exports[0].results] {
        let ids: Vec<u32> = list.iter().map(|f| f.id).collect();
        let expected: Vec<u32> = (2..2 + ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }
    assert_eq!(exports[0].params.len(), 5);
    assert_eq!(exports[0].params[4].schema_type, SchemaType::Unsupported);
}

#[test]
fn duplicate_markers_render_twice() {
    let src = r#"
package rpc

// goa-export Echo
// goa-export Echo
func Echo(s string) string { return s }
"#;
    let text = render(src);
    assert_eq!(text.matches("message Echo_call {").count(), 2);
}

#[test]
fn slice_of_pointers_fails_rendering() {
    let src = r#"
package rpc

// goa-export Points
func Points(ps []*Point) int { return len(ps) }
"#;
    let err = render_to_string(&ProtoGenerator::default(), &records(src)).unwrap_err();
    assert!(matches!(err, RenderError::Malformed { .. }));
}
