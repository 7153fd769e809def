//! Source loading for the root file and `include` directives.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Where included files come from.
///
/// The parser resolves every `include` through this trait, so tests and
/// embedders can serve sources from memory.
pub trait SourceLoader {
    /// Resolve `target` as written in an `include` of the file at `from`.
    ///
    /// Relative targets are joined onto the directory containing `from`.
    fn resolve(&self, from: &Path, target: &Path) -> PathBuf {
        if target.is_absolute() {
            return normalize(target);
        }
        let dir = from.parent().unwrap_or_else(|| Path::new(""));
        normalize(&dir.join(target))
    }

    /// Read the full text of a resolved path.
    fn load(&self, path: &Path) -> io::Result<Arc<str>>;
}

/// Lexically remove `.` and `..` components.
///
/// Two spellings of the same file must resolve to the same key so the
/// include stack can detect recursion.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Reads from the file system.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn resolve(&self, from: &Path, target: &Path) -> PathBuf {
        let dir = from.parent().unwrap_or_else(|| Path::new(""));
        let joined = dir.join(target);
        std::fs::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined))
    }

    fn load(&self, path: &Path) -> io::Result<Arc<str>> {
        std::fs::read_to_string(path).map(Arc::from)
    }
}

/// Serves sources from an in-memory table keyed by normalized path.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, Arc<str>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, text: &str) {
        self.files.insert(normalize(path.as_ref()), Arc::from(text));
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<Arc<str>> {
        self.files.get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file `{}`", path.display()),
            )
        })
    }
}
