//! Resolution of `--file` arguments into Go source paths.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expand each argument in order: an existing file is taken as is, anything
/// with glob metacharacters is matched against `.go` files under the project
/// root (respecting .gitignore). Duplicates keep their first position.
pub fn resolve(project_root: &Path, args: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for arg in args {
        let candidate = project_root.join(arg);
        let matched = if candidate.is_file() {
            vec![candidate]
        } else if is_glob(arg) {
            let matched = expand_glob(project_root, arg)?;
            if matched.is_empty() {
                anyhow::bail!("no Go files under {} match {}", project_root.display(), arg);
            }
            matched
        } else {
            anyhow::bail!("no such file: {}", candidate.display());
        };

        for path in matched {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

fn is_glob(arg: &str) -> bool {
    arg.contains(['*', '?', '[', '{'])
}

fn expand_glob(project_root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = globset::Glob::new(pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .compile_matcher();

    let walker = ignore::WalkBuilder::new(project_root)
        .hidden(true)
        .git_ignore(true)
        .build();

    let mut matched = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }
        let rel = path.strip_prefix(project_root).unwrap_or(path);
        if matcher.is_match(rel) {
            matched.push(path.to_path_buf());
        }
    }
    matched.sort();
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "package p\n").unwrap();
    }

    #[test]
    fn test_literal_paths_keep_argument_order() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b.go");
        touch(tmp.path(), "a.go");

        let paths = resolve(tmp.path(), &["b.go".to_string(), "a.go".to_string()]).unwrap();
        assert_eq!(paths, vec![tmp.path().join("b.go"), tmp.path().join("a.go")]);
    }

    #[test]
    fn test_glob_expands_sorted_go_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "box/open.go");
        touch(tmp.path(), "box/close.go");
        touch(tmp.path(), "box/README.md");
        touch(tmp.path(), "other/x.go");

        let paths = resolve(tmp.path(), &["box/*".to_string()]).unwrap();
        assert_eq!(
            paths,
            vec![tmp.path().join("box/close.go"), tmp.path().join("box/open.go")]
        );
    }

    #[test]
    fn test_duplicates_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.go");

        let paths = resolve(tmp.path(), &["a.go".to_string(), "*.go".to_string()]).unwrap();
        assert_eq!(paths, vec![tmp.path().join("a.go")]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve(tmp.path(), &["nope.go".to_string()]).unwrap_err();
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_unmatched_glob_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve(tmp.path(), &["*.go".to_string()]).is_err());
    }
}
