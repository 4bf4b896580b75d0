//! CLI binary for ifacemaker: generate a Go interface from the methods of a type.

mod files;

use anyhow::{Context, Result};
use clap::Parser;
use ifacemaker_core::config::MakerConfig;
use ifacemaker_core::model::StructData;
use ifacemaker_gen::{InterfaceRequest, formatter_from_config, merge_struct_data};
use ifacemaker_parser::{ScanOptions, scan_bytes};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "ifacemaker",
    version,
    about = "Generate a Go interface from the methods of a type"
)]
struct Cli {
    /// Go source file or glob pattern to scan (repeatable)
    #[arg(short, long = "file", required = true)]
    files: Vec<String>,

    /// Type whose exported methods make up the interface
    #[arg(short, long = "struct")]
    struct_name: String,

    /// Name of the generated interface
    #[arg(short, long, required_unless_present = "json")]
    iface: Option<String>,

    /// Package name of the generated file
    #[arg(short, long, required_unless_present = "json")]
    pkg: Option<String>,

    /// Comment placed at the top of the generated file
    #[arg(short, long)]
    comment: Option<String>,

    /// Doc comment placed above the interface
    #[arg(short = 'y', long)]
    iface_comment: Option<String>,

    /// Copy method doc comments (overrides config; default true)
    #[arg(short, long)]
    doc: Option<bool>,

    /// Method name to leave out (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the collected methods as JSON instead of generating code
    #[arg(long)]
    json: bool,

    /// Project root for configuration and glob expansion (defaults to current directory)
    #[arg(long)]
    project: Option<PathBuf>,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = MakerConfig::load(&project_root)?;

    let options = scan_options(&cli, &config);
    let paths = files::resolve(&project_root, &cli.files)?;
    let data = collect_struct(&paths, &cli.struct_name, &options)?;

    if cli.json {
        let mut json = serde_json::to_string_pretty(&data)?;
        json.push('\n');
        return write_output(cli.output.as_deref(), json.as_bytes());
    }

    let iface = cli.iface.as_deref().context("--iface is required")?;
    let pkg = cli.pkg.as_deref().context("--pkg is required")?;
    let formatter = formatter_from_config(&config.format)?;

    let code = InterfaceRequest::new(pkg, iface)
        .with_methods(data.method_lines())
        .with_imports(data.imports)
        .with_file_comment(cli.comment.clone())
        .with_iface_comment(cli.iface_comment.clone())
        .generate(formatter.as_ref())
        .with_context(|| format!("failed to generate interface {}", iface))?;

    write_output(cli.output.as_deref(), &code)
}

/// Flags win over config; excludes from both are combined.
fn scan_options(cli: &Cli, config: &MakerConfig) -> ScanOptions {
    let copy_docs = cli.doc.unwrap_or(config.generation.copy_docs);
    ScanOptions::new(
        copy_docs,
        config
            .generation
            .exclude
            .iter()
            .chain(&cli.exclude)
            .cloned(),
    )
}

/// Scan every file and merge what was found for `name`, in file order.
fn collect_struct(paths: &[PathBuf], name: &str, options: &ScanOptions) -> Result<StructData> {
    let mut parts = Vec::new();
    for path in paths {
        let source =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let mut index = scan_bytes(&source, options)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if let Some(data) = index.remove(name) {
            tracing::debug!(
                file = %path.display(),
                methods = data.methods.len(),
                "collected methods"
            );
            parts.push(data);
        }
    }

    let merged = merge_struct_data(parts);
    if merged.methods.is_empty() {
        tracing::warn!(
            struct_name = name,
            files = paths.len(),
            "no exported methods found; the interface will be empty"
        );
    }
    Ok(merged)
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            std::fs::write(path, bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), "wrote interface");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
