use ifacemaker_gen::{Formatter, GoFormatter, InterfaceRequest, make_interface, render_interface};
use ifacemaker_parser::{ScanOptions, scan};

#[test]
fn synthesize_boxer_structure() {
    let code = render_interface("shapes", "Boxer", &["Open() error".to_string()], &[]);
    let package = code.find("package shapes").unwrap();
    let imports = code.find("import (\n)").unwrap();
    let iface = code.find("type Boxer interface {\nOpen() error\n}").unwrap();
    assert!(package < imports && imports < iface);
}

#[test]
fn synthesize_boxer_formatted() {
    let out = make_interface(
        "shapes",
        "Boxer",
        &["Open() error".to_string()],
        &[],
        &GoFormatter::new(),
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "package shapes\n\ntype Boxer interface {\n\tOpen() error\n}\n"
    );
}

#[test]
fn synthesize_keeps_empty_import_block_when_not_pruning() {
    let out = make_interface(
        "shapes",
        "Boxer",
        &["Open() error".to_string()],
        &["\"io\"".to_string()],
        &GoFormatter::new().with_prune_imports(false),
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "package shapes\n\nimport (\n\t\"io\"\n)\n\ntype Boxer interface {\n\tOpen() error\n}\n"
    );
}

#[test]
fn synthesize_from_scanned_module() {
    let source = r#"package store

import (
	"context"
	"database/sql"
	"time"
)

type Store struct {
	db *sql.DB
}

// Get loads a row.
func (s *Store) Get(ctx context.Context, id int64) (*sql.Row, error) { return nil, nil }

// Ping checks the connection.
func (s *Store) Ping() error { return nil }

func (s *Store) reset() {}
"#;
    let index = scan(source, &ScanOptions::default()).unwrap();
    let data = index.get("Store").unwrap();
    let out = InterfaceRequest::new("store", "Storer")
        .with_methods(data.method_lines())
        .with_imports(data.imports.clone())
        .with_file_comment(Some("Code generated by ifacemaker; DO NOT EDIT.".to_string()))
        .with_iface_comment(Some("Storer is the interface of Store.".to_string()))
        .generate(&GoFormatter::new())
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"// Code generated by ifacemaker; DO NOT EDIT.

package store

import (
	"context"
	"database/sql"
)

// Storer is the interface of Store.
type Storer interface {
	// Get loads a row.
	Get(ctx context.Context, id int64) (*sql.Row, error)
	// Ping checks the connection.
	Ping() error
}
"#
    );
}

#[test]
fn synthesize_invalid_method_line_is_format_error() {
    let formatter = GoFormatter::new();
    let code = render_interface("p", "Broken", &["Open( error {".to_string()], &[]);
    assert!(formatter.format(&code).is_err());
}
