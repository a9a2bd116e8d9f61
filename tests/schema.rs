//! Schema front-end tests: enum discovery, statement classification, type-position references.

use proto_bitmap::ast::{DeclKind, EnumStatement, OptionName};
use proto_bitmap::{parse, TransformError};

// ==================== Declarations ====================

#[test]
fn parse_empty_document() {
    let s = parse("").expect("empty document can parse");
    assert!(s.enums.is_empty());
    assert!(s.declarations.is_empty());
    assert!(s.type_refs.is_empty());
}

#[test]
fn parse_top_level_and_nested_declarations() {
    let src = r#"
syntax = "proto2";
package riscv;

enum Top { A = 0; }

message Privileged {
  enum Mode {
    option (bitmap) = true;
    M = 0;
    S = 1;
    U = 2;
  }
  message Inner {}
  optional Mode modes = 1;
}

service Traps {
  rpc Raise(Privileged) returns (Privileged);
}
"#;
    let s = parse(src).expect("parse");
    let names: Vec<(&str, DeclKind)> = s
        .declarations
        .iter()
        .map(|d| (d.name.as_str(), d.kind))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Top", DeclKind::Enum),
            ("Privileged", DeclKind::Message),
            ("Mode", DeclKind::Enum),
            ("Inner", DeclKind::Message),
            ("Traps", DeclKind::Service),
        ]
    );
    assert_eq!(s.enums.len(), 2);
    assert!(!s.enums[0].has_marker("bitmap"));
    assert!(s.enums[1].has_marker("bitmap"));
    assert_eq!(s.enums[1].line, 8);
    assert_eq!(s.enums[1].members().count(), 3);
}

#[test]
fn enum_span_covers_keyword_through_brace() {
    let src = "// lead\nenum   Gap\n{\n  A = 0;\n}\ntail";
    let s = parse(src).expect("parse");
    let span = s.enums[0].span.clone();
    assert_eq!(&src[span], "enum   Gap\n{\n  A = 0;\n}");
}

#[test]
fn enum_keyword_as_field_name_is_not_a_declaration() {
    let s = parse("message M {\n  int32 enum = 1;\n}\n").expect("parse");
    assert!(s.enums.is_empty());
}

#[test]
fn braces_inside_strings_do_not_close_enum() {
    let s = parse("enum E {\n  option (note) = \"}\";\n  A = 0;\n}\n").expect("parse");
    assert_eq!(s.enums.len(), 1);
    assert_eq!(s.enums[0].members().count(), 1);
}

#[test]
fn unterminated_enum_reports_line() {
    let err = parse("\n\nenum Dangling {\n  A = 0;\n").unwrap_err();
    assert!(
        matches!(err, TransformError::UnterminatedDeclaration { line: 3, .. }),
        "{:?}",
        err
    );
}

// ==================== Enum statements ====================

#[test]
fn extension_option_with_dotted_name() {
    let s = parse("enum E { option (my.ext) = 1; }").expect("parse");
    assert_eq!(
        s.enums[0].statements,
        vec![EnumStatement::Option {
            name: OptionName::Extension("my.ext".into()),
            value: "1".into(),
            line: 1,
        }]
    );
}

#[test]
fn bitmap_option_without_value_still_marks() {
    let s = parse("enum E { option (bitmap); A = 0; }").expect("parse");
    assert!(s.enums[0].has_marker("bitmap"));
}

#[test]
fn similar_option_names_do_not_mark() {
    let s = parse("enum E { option (bitmaps) = true; option bitmap = true; A = 0; }").expect("parse");
    assert!(!s.enums[0].has_marker("bitmap"));
}

#[test]
fn missing_final_semicolon_is_still_a_member() {
    let s = parse("enum E { A = 0; B = 1 }").expect("parse");
    assert_eq!(s.enums[0].members().count(), 2);
}

#[test]
fn statement_lines_follow_first_token() {
    let s = parse("enum E {\n\n  A\n    = 0;\n  /* c */ B = 1;\n}").expect("parse");
    let lines: Vec<usize> = s.enums[0].statements.iter().map(|st| st.line()).collect();
    assert_eq!(lines, vec![3, 5]);
}

// ==================== Type references ====================

#[test]
fn type_refs_skip_keywords_and_values() {
    let src = r#"
message M {
  option deprecated = true;
  reserved 4;
  oneof choice {
    Flags one = 1;
  }
  map<string, Flags> by_name = 2;
  required Flags two = 3;
}
"#;
    let s = parse(src).expect("parse");
    let flags: Vec<usize> = s
        .type_refs
        .iter()
        .filter(|r| r.name == "Flags")
        .map(|r| r.line)
        .collect();
    assert_eq!(flags, vec![6, 9]);
}

#[test]
fn type_ref_after_block_comment_is_not_leading() {
    let s = parse("message M {\n  /* x */ Flags a = 1;\n}\n").expect("parse");
    assert!(s.type_refs.iter().all(|r| r.name != "Flags"));
}

#[test]
fn type_ref_on_first_line_without_indent() {
    let s = parse("Flags a = 1;").expect("parse");
    assert_eq!(s.type_refs.len(), 1);
    assert_eq!(s.type_refs[0].span, 0..5);
}
