use crate::app::error::{AppError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process::Command;

const BRANCH: &str = "├── ";
const INDENT: &str = "│   ";

/// Something that can draw the directory tree for the document header.
pub trait TreeRenderer {
    fn render(&self, root: &Path, ignore_dirs: &[String]) -> Result<String>;
}

/// Shells out to a `tree`-compatible program found on `PATH`.
///
/// Runs `tree -a [-I a|b] ROOT`: hidden entries are listed like the built-in
/// renderer lists them, and ignored names are filtered by the tool itself.
#[derive(Debug, Clone)]
pub struct ExternalTree {
    program: String,
}

impl Default for ExternalTree {
    fn default() -> Self {
        Self::new("tree")
    }
}

impl ExternalTree {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TreeRenderer for ExternalTree {
    fn render(&self, root: &Path, ignore_dirs: &[String]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-a");
        if !ignore_dirs.is_empty() {
            cmd.arg("-I").arg(ignore_dirs.join("|"));
        }
        cmd.arg(root);

        log::debug!("Running {:?}", cmd);
        let output = cmd.output().map_err(|source| AppError::TreeSpawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(AppError::TreeStatus {
                program: self.program.clone(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Recursive renderer built on `std::fs::read_dir`.
///
/// Every entry becomes one `├── name` line; directories additionally recurse
/// one `│   ` deeper. Entries named in the ignore list produce nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTree {
    pub sort: bool,
}

impl BuiltinTree {
    fn render_dir(
        &self,
        dir: &Path,
        prefix: &str,
        ignore: &HashSet<&str>,
        out: &mut String,
    ) -> Result<()> {
        let read_err = |source: std::io::Error| AppError::DirRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir)
            .map_err(read_err)?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(read_err)?;
        if self.sort {
            entries.sort_by_key(|e| e.file_name());
        }

        for entry in entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if ignore.contains(&*name) {
                log::trace!("Tree: skipping ignored entry {}", entry.path().display());
                continue;
            }

            out.push_str(prefix);
            out.push_str(BRANCH);
            out.push_str(&name);
            out.push('\n');

            let is_dir = entry.file_type().map_err(read_err)?.is_dir();
            if is_dir {
                let child_prefix = format!("{}{}", prefix, INDENT);
                self.render_dir(&entry.path(), &child_prefix, ignore, out)?;
            }
        }

        Ok(())
    }
}

impl TreeRenderer for BuiltinTree {
    fn render(&self, root: &Path, ignore_dirs: &[String]) -> Result<String> {
        let ignore: HashSet<&str> = ignore_dirs.iter().map(String::as_str).collect();
        let mut out = String::new();
        self.render_dir(root, "", &ignore, &mut out)?;
        Ok(out)
    }
}

/// Tries `primary`; any error from it is logged and `secondary` is used instead.
#[derive(Debug, Clone, Default)]
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: TreeRenderer, S: TreeRenderer> TreeRenderer for Fallback<P, S> {
    fn render(&self, root: &Path, ignore_dirs: &[String]) -> Result<String> {
        match self.primary.render(root, ignore_dirs) {
            Ok(text) => Ok(text),
            Err(err) => {
                if err.is_tree_tool() {
                    log::debug!("{}; using built-in tree", err);
                } else {
                    log::warn!("Tree rendering failed ({}), falling back", err);
                }
                self.secondary.render(root, ignore_dirs)
            }
        }
    }
}

/// The renderer the command line uses: external `tree`, then the built-in one.
pub fn default_renderer(sort: bool) -> Fallback<ExternalTree, BuiltinTree> {
    Fallback::new(ExternalTree::default(), BuiltinTree { sort })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ignore(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join("a.go"), "package a\n").unwrap();
        fs::write(root.join("src/b.js"), "b\n").unwrap();
        fs::write(root.join("src/nested/c.go"), "c\n").unwrap();
        fs::write(root.join(".git/HEAD"), "ref\n").unwrap();
        dir
    }

    struct Failing;

    impl TreeRenderer for Failing {
        fn render(&self, root: &Path, _ignore_dirs: &[String]) -> Result<String> {
            Err(AppError::DirRead {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            })
        }
    }

    #[test]
    fn builtin_renders_sorted_tree() {
        let dir = fixture();
        let tree = BuiltinTree { sort: true }
            .render(dir.path(), &ignore(&[".git"]))
            .unwrap();

        let expected = "\
├── a.go
├── src
│   ├── b.js
│   ├── nested
│   │   ├── c.go
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn builtin_skips_ignored_subtrees() {
        let dir = fixture();
        let tree = BuiltinTree::default()
            .render(dir.path(), &ignore(&[".git", "nested"]))
            .unwrap();

        assert!(!tree.contains(".git"));
        assert!(!tree.contains("HEAD"));
        assert!(!tree.contains("nested"));
        assert!(!tree.contains("c.go"));
        assert!(tree.contains("├── a.go\n"));
        assert!(tree.contains("│   ├── b.js\n"));
    }

    #[test]
    fn builtin_lists_everything_without_ignores() {
        let dir = fixture();
        let tree = BuiltinTree { sort: true }.render(dir.path(), &[]).unwrap();
        assert!(tree.starts_with("├── .git\n│   ├── HEAD\n│   ├── objects\n"));
    }

    #[test]
    fn builtin_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = BuiltinTree::default()
            .render(&dir.path().join("missing"), &[])
            .unwrap_err();
        assert!(matches!(err, AppError::DirRead { .. }));
    }

    #[test]
    fn external_missing_program_is_tree_tool_error() {
        let dir = fixture();
        let err = ExternalTree::new("code2text-no-such-tree-program")
            .render(dir.path(), &[])
            .unwrap_err();
        assert!(err.is_tree_tool());
    }

    #[cfg(unix)]
    #[test]
    fn external_passes_hidden_and_ignore_flags() {
        let dir = fixture();
        let out = ExternalTree::new("echo")
            .render(dir.path(), &ignore(&[".git", ".idea"]))
            .unwrap();
        assert_eq!(out, format!("-a -I .git|.idea {}\n", dir.path().display()));
    }

    #[cfg(unix)]
    #[test]
    fn external_without_ignores_omits_pattern() {
        let dir = fixture();
        let out = ExternalTree::new("echo").render(dir.path(), &[]).unwrap();
        assert_eq!(out, format!("-a {}\n", dir.path().display()));
    }

    #[cfg(unix)]
    #[test]
    fn external_nonzero_exit_is_tree_tool_error() {
        let dir = fixture();
        let err = ExternalTree::new("false").render(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, AppError::TreeStatus { .. }));
        assert!(err.is_tree_tool());
    }

    #[cfg(unix)]
    #[test]
    fn fallback_keeps_successful_primary_output() {
        let dir = fixture();
        let tree = Fallback::new(ExternalTree::new("echo"), BuiltinTree::default())
            .render(dir.path(), &[])
            .unwrap();
        assert!(tree.starts_with("-a "));
    }

    #[test]
    fn fallback_uses_secondary_when_program_missing() {
        let dir = fixture();
        let renderer = Fallback::new(
            ExternalTree::new("code2text-no-such-tree-program"),
            BuiltinTree { sort: true },
        );
        let tree = renderer.render(dir.path(), &ignore(&[".git"])).unwrap();
        let builtin = BuiltinTree { sort: true }
            .render(dir.path(), &ignore(&[".git"]))
            .unwrap();
        assert_eq!(tree, builtin);
    }

    #[test]
    fn fallback_recovers_from_any_primary_error() {
        let dir = fixture();
        let tree = Fallback::new(Failing, BuiltinTree { sort: true })
            .render(dir.path(), &[])
            .unwrap();
        assert!(tree.contains("a.go"));
    }

    #[test]
    fn fallback_propagates_secondary_error() {
        let dir = TempDir::new().unwrap();
        let err = Fallback::new(Failing, BuiltinTree::default())
            .render(&dir.path().join("missing"), &[])
            .unwrap_err();
        assert!(matches!(err, AppError::DirRead { .. }));
    }
}
