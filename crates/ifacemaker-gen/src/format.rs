//! Canonicalization of synthesized interface source.

use crate::imports::{ImportSpec, referenced_packages};
use ifacemaker_core::config::{FormatConfig, FormatterKind};
use ifacemaker_parser::ScanError;
use ifacemaker_parser::treesitter::{node_text, parse_go};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tree_sitter::Node;

/// Errors from canonicalizing generated source.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("generated code is not valid Go: {0}")]
    Syntax(#[source] ScanError),
    #[error("failed to run formatter `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("formatter `{program}` failed ({status}): {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("formatter command is empty")]
    EmptyCommand,
}

/// Turns assembled source text into canonical source bytes.
pub trait Formatter {
    fn format(&self, code: &str) -> Result<Vec<u8>, FormatError>;
}

/// Build the formatter selected by configuration.
pub fn formatter_from_config(config: &FormatConfig) -> Result<Box<dyn Formatter>, FormatError> {
    match config.formatter {
        FormatterKind::Builtin => Ok(Box::new(
            GoFormatter::new().with_prune_imports(config.prune_imports),
        )),
        FormatterKind::Command => {
            let formatter =
                CommandFormatter::from_argv(&config.command).ok_or(FormatError::EmptyCommand)?;
            Ok(Box::new(formatter))
        }
    }
}

// ---------------------------------------------------------------------------
// Builtin
// ---------------------------------------------------------------------------

/// In-process formatter: validates with tree-sitter and re-emits gofmt-style
/// layout, sorting and de-duplicating imports and optionally dropping the
/// ones nothing references.
#[derive(Debug, Clone, Copy)]
pub struct GoFormatter {
    prune_imports: bool,
}

impl Default for GoFormatter {
    fn default() -> Self {
        Self {
            prune_imports: true,
        }
    }
}

impl GoFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prune_imports(mut self, prune: bool) -> Self {
        self.prune_imports = prune;
        self
    }
}

impl Formatter for GoFormatter {
    fn format(&self, code: &str) -> Result<Vec<u8>, FormatError> {
        let tree = parse_go(code).map_err(FormatError::Syntax)?;
        Ok(canonicalize(&tree.root_node(), code, self.prune_imports).into_bytes())
    }
}

fn canonicalize(root: &Node, source: &str, prune_imports: bool) -> String {
    let mut header: Vec<Node> = Vec::new();
    let mut package: Option<Node> = None;
    let mut specs: Vec<ImportSpec> = Vec::new();
    let mut body: Vec<Node> = Vec::new();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => package = Some(child),
            "import_declaration" => collect_specs(&child, source, &mut specs),
            "comment" if package.is_none() => header.push(child),
            _ => body.push(child),
        }
    }

    if prune_imports {
        let used = referenced_packages(root, source);
        specs.retain(|spec| {
            let keep = spec.is_side_effect()
                || spec.candidate_names().iter().any(|name| used.contains(name));
            if !keep {
                tracing::debug!(import = %spec.render(), "dropping unused import");
            }
            keep
        });
    }
    specs.sort();
    specs.dedup();

    let mut out = String::new();
    push_items(&mut out, &header, source);
    if let (Some(last), Some(pkg)) = (header.last(), package)
        && pkg.start_position().row > last.end_position().row + 1
    {
        out.push('\n');
    }
    if let Some(pkg) = package {
        out.push_str(&normalize_ws(node_text(&pkg, source)));
        out.push('\n');
    }
    if !specs.is_empty() {
        out.push_str("\nimport (\n");
        for spec in &specs {
            out.push('\t');
            out.push_str(&spec.render());
            out.push('\n');
        }
        out.push_str(")\n");
    }
    if !body.is_empty() {
        out.push('\n');
        push_items(&mut out, &body, source);
    }
    out
}

fn collect_specs(node: &Node, source: &str, specs: &mut Vec<ImportSpec>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.extend(ImportSpec::from_node(&child, source)),
            "import_spec_list" => collect_specs(&child, source, specs),
            _ => {}
        }
    }
}

/// Emit top-level items one per line.
fn push_items(out: &mut String, items: &[Node], source: &str) {
    let mut prev_end: Option<usize> = None;
    for item in items {
        push_line(out, prev_end, true, item, &render_top_level(item, source), "");
        prev_end = Some(item.end_position().row);
    }
}

/// Append `text` as its own line, or onto the previous line when `node` is a
/// comment starting on `prev_end`, the row the previous line ended on. Single
/// blank lines survive when `keep_blank` is set.
fn push_line(
    out: &mut String,
    prev_end: Option<usize>,
    keep_blank: bool,
    node: &Node,
    text: &str,
    indent: &str,
) {
    if let Some(end) = prev_end {
        let row = node.start_position().row;
        if node.kind() == "comment" && row == end {
            out.pop();
            out.push(' ');
            out.push_str(text);
            out.push('\n');
            return;
        }
        if keep_blank && row > end + 1 {
            out.push('\n');
        }
    }
    out.push_str(indent);
    out.push_str(text);
    out.push('\n');
}

fn render_top_level(node: &Node, source: &str) -> String {
    if node.kind() == "type_declaration"
        && let Some(rendered) = render_interface_decl(node, source)
    {
        return rendered;
    }
    node_text(node, source).trim().to_string()
}

/// `type Name interface { ... }` with one tab-indented element per line.
/// Anything else is left to the caller to emit verbatim.
fn render_interface_decl(decl: &Node, source: &str) -> Option<String> {
    let mut cursor = decl.walk();
    if decl.children(&mut cursor).any(|c| c.kind() == "(") {
        // Grouped `type ( ... )` declarations stay verbatim.
        return None;
    }
    let spec = decl
        .named_children(&mut cursor)
        .find(|c| c.kind() == "type_spec")?;
    let iface = spec.child_by_field_name("type")?;
    if iface.kind() != "interface_type" {
        return None;
    }

    let name = node_text(&spec.child_by_field_name("name")?, source);
    let params = spec
        .child_by_field_name("type_parameters")
        .map(|p| normalize_ws(node_text(&p, source)))
        .unwrap_or_default();

    let mut out = format!("type {}{} interface {{\n", name, params);
    // Seeded with the `{` row so a comment trailing it stays on that line.
    let mut ic = iface.walk();
    let mut prev_end = iface
        .children(&mut ic)
        .find(|c| c.kind() == "{")
        .map(|brace| brace.end_position().row);
    let mut first = true;
    for elem in iface.named_children(&mut ic) {
        let text = render_element(&elem, source);
        push_line(&mut out, prev_end, !first, &elem, &text, "\t");
        prev_end = Some(elem.end_position().row);
        first = false;
    }
    out.push('}');
    Some(out)
}

fn render_element(elem: &Node, source: &str) -> String {
    let text = node_text(elem, source).trim();
    if elem.kind() == "comment" || contains_comment(elem) {
        return text.to_string();
    }
    normalize_ws(text)
}

fn contains_comment(node: &Node) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|c| c.kind() == "comment" || contains_comment(&c))
}

/// Collapse whitespace runs to one space outside string and rune literals,
/// drop spaces just inside brackets and before commas, and drop a trailing
/// comma before a closing bracket.
fn normalize_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if matches!(c, ')' | ']') && out.ends_with(',') {
            out.pop();
        }
        let last = out.chars().last();
        if (pending_space || last == Some(','))
            && !matches!(last, None | Some('(' | '['))
            && !matches!(c, ')' | ']' | ',')
        {
            out.push(' ');
        }
        pending_space = false;
        if matches!(c, '"' | '\'' | '`') {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// External command
// ---------------------------------------------------------------------------

/// Pipes source through an external program (`goimports`, `gofmt`, ...) and
/// returns its stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Program followed by its arguments. `None` for an empty argv.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    fn io_error(&self, source: io::Error) -> FormatError {
        FormatError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, code: &str) -> Result<Vec<u8>, FormatError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.io_error(e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.io_error(io::Error::other("stdin not captured")))?;
        let input = code.as_bytes().to_vec();
        // Written from a separate thread so a chatty formatter can't deadlock us.
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(|e| self.io_error(e))?;
        if !output.status.success() {
            return Err(FormatError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        writer
            .join()
            .map_err(|_| self.io_error(io::Error::other("stdin writer panicked")))?
            .map_err(|e| self.io_error(e))?;

        Ok(output.stdout)
    }
}
