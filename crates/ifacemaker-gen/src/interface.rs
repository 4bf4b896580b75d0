//! Textual assembly of Go interface declarations.
//!
//! Nothing here validates names or reorders input: lines are concatenated in a
//! fixed structural order and handed to a [`Formatter`].

use crate::format::{FormatError, Formatter};

/// Everything needed to emit one interface file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceRequest {
    pub package: String,
    pub name: String,
    /// Pre-rendered method lines, doc comments included.
    pub methods: Vec<String>,
    /// Import descriptors (`"path"` or `alias "path"`).
    pub imports: Vec<String>,
    /// Comment placed above the package clause.
    pub file_comment: Option<String>,
    /// Doc comment placed above the interface type.
    pub iface_comment: Option<String>,
}

impl InterfaceRequest {
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_methods(mut self, methods: Vec<String>) -> Self {
        self.methods = methods;
        self
    }

    #[must_use]
    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    #[must_use]
    pub fn with_file_comment(mut self, comment: Option<String>) -> Self {
        self.file_comment = comment.filter(|c| !c.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_iface_comment(mut self, comment: Option<String>) -> Self {
        self.iface_comment = comment.filter(|c| !c.trim().is_empty());
        self
    }

    /// Unformatted source text.
    pub fn render(&self) -> String {
        let mut out: Vec<String> = Vec::new();
        if let Some(comment) = &self.file_comment {
            out.extend(comment_lines(comment));
            out.push(String::new());
        }
        out.push(format!("package {}", self.package));
        out.push("import (".to_string());
        out.extend(self.imports.iter().cloned());
        out.push(")".to_string());
        if let Some(comment) = &self.iface_comment {
            out.extend(comment_lines(comment));
        }
        out.push(format!("type {} interface {{", self.name));
        out.extend(self.methods.iter().cloned());
        out.push("}".to_string());

        let mut code = out.join("\n");
        code.push('\n');
        code
    }

    /// Render and canonicalize.
    pub fn generate(&self, formatter: &dyn Formatter) -> Result<Vec<u8>, FormatError> {
        formatter.format(&self.render())
    }
}

/// `// line` for every line of a free-form comment.
fn comment_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(|line| {
        let line = line.trim_end();
        if line.is_empty() {
            "//".to_string()
        } else {
            format!("// {}", line)
        }
    })
}

/// Assemble an interface file from its parts without formatting it.
pub fn render_interface(
    package: &str,
    iface: &str,
    methods: &[String],
    imports: &[String],
) -> String {
    InterfaceRequest::new(package, iface)
        .with_methods(methods.to_vec())
        .with_imports(imports.to_vec())
        .render()
}

/// Assemble an interface file and run it through `formatter`.
pub fn make_interface(
    package: &str,
    iface: &str,
    methods: &[String],
    imports: &[String],
    formatter: &dyn Formatter,
) -> Result<Vec<u8>, FormatError> {
    formatter.format(&render_interface(package, iface, methods, imports))
}
