//! Path helpers for configuration sources

use std::path::{Component, Path, PathBuf};

/// Resolve `value` against `base` unless it is already absolute, then
/// normalize it lexically
pub fn resolve(base: &Path, value: impl AsRef<Path>) -> PathBuf {
    let value = value.as_ref();
    if value.is_absolute() {
        normalize(value)
    } else {
        normalize(&base.join(value))
    }
}

/// Drop `.` components and fold `..` into the preceding component
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Search `start_dir` and then each ancestor for a file called `file_name`
pub fn find_upwards(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("/proj/./foo/../bar/./baz");
        assert_eq!(normalize(path), PathBuf::from("/proj/bar/baz"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Path::new("/work/project");
        assert_eq!(resolve(base, "docs"), PathBuf::from("/work/project/docs"));
        assert_eq!(resolve(base, "../shared"), PathBuf::from("/work/shared"));
        assert_eq!(resolve(base, "/tmp/out"), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_find_upwards() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();

        let nested = root.join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_upwards(&nested, "tsconfig.json"),
            Some(root.join("tsconfig.json"))
        );
        assert_eq!(find_upwards(&nested, "refdoc-missing.json"), None);
    }
}
