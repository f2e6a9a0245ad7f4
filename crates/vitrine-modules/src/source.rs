//! Module source resolution.
//!
//! A module is identified by a filesystem entry with extension `.js`,
//! `.asar`, or `.module` (the latter two are opaque loadable packages).
//! Bare names resolve against the builtin manifest first, then the
//! external (user) module directory, before falling back to path
//! resolution relative to the current working directory.

use std::path::{Path, PathBuf};

use crate::manifest::{BuiltinModule, find_builtin};
use crate::module::ModuleId;

/// File extensions the module file contract recognizes.
pub const MODULE_EXTENSIONS: &[&str] = &["js", "asar", "module"];

/// Where a resolved module comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSource {
    /// A bundled module, registered in the builtin manifest.
    Builtin(ModuleId),
    /// An entry of the external module directory (or an explicit path).
    External(PathBuf),
}

impl ModuleSource {
    /// The file stem of an external source, used to match a builtin.
    #[must_use]
    pub fn stem(&self) -> Option<&str> {
        match self {
            Self::Builtin(id) => Some(id.as_str()),
            Self::External(path) => path.file_stem().and_then(|s| s.to_str()),
        }
    }
}

fn has_module_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MODULE_EXTENSIONS.contains(&ext))
}

fn is_bare_name(path: &Path) -> bool {
    path.components().count() == 1 && !path.is_absolute()
}

/// Resolve a candidate module reference.
///
/// Returns `None` when the candidate does not match the module file
/// contract at all; such candidates are skipped without side effects.
#[must_use]
pub fn resolve_source(
    candidate: &str,
    manifest: &[BuiltinModule],
    external_dir: &Path,
) -> Option<ModuleSource> {
    let path = Path::new(candidate);
    if !has_module_extension(path) {
        return None;
    }

    if is_bare_name(path) && !path.exists() {
        let stem = path.file_stem()?.to_str()?;
        if let Some(entry) = find_builtin(manifest, stem) {
            return Some(ModuleSource::Builtin((entry.descriptor)().id.clone()));
        }

        let external = external_dir.join(path);
        if external.exists() {
            return Some(ModuleSource::External(external));
        }
        return None;
    }

    Some(ModuleSource::External(
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::builtin_manifest;
    use tempfile::TempDir;

    #[test]
    fn test_wrong_extension_is_unrecognized() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            resolve_source("notes.txt", builtin_manifest(), temp.path()),
            None
        );
        assert_eq!(
            resolve_source("linux-blur", builtin_manifest(), temp.path()),
            None
        );
    }

    #[test]
    fn test_bare_name_resolves_builtin_first() {
        let temp = TempDir::new().unwrap();
        let source = resolve_source("linux-blur.module", builtin_manifest(), temp.path());
        assert_eq!(source, Some(ModuleSource::Builtin(ModuleId::new("linux-blur"))));
    }

    #[test]
    fn test_bare_name_falls_back_to_external_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("custom.js"), "").unwrap();

        let source = resolve_source("custom.js", builtin_manifest(), temp.path());
        assert_eq!(
            source,
            Some(ModuleSource::External(temp.path().join("custom.js")))
        );
    }

    #[test]
    fn test_unknown_bare_name_is_unrecognized() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            resolve_source("ghost.asar", builtin_manifest(), temp.path()),
            None
        );
    }

    #[test]
    fn test_explicit_path_resolves_against_cwd() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("pack.asar");
        std::fs::write(&file, "").unwrap();

        let source =
            resolve_source(file.to_str().unwrap(), builtin_manifest(), temp.path()).unwrap();
        assert_eq!(source, ModuleSource::External(file));
    }

    #[test]
    fn test_external_stem() {
        let source = ModuleSource::External(PathBuf::from("/tmp/linux-blur.module"));
        assert_eq!(source.stem(), Some("linux-blur"));
    }
}
