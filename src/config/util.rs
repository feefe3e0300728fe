//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from the current directory
///
/// An absolute `config_name` is returned as-is when it exists.
///
/// ```text
/// /home/user/site/src/_app/feed/  ← cwd
/// /home/user/site/i18n.toml       ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src/_app/feed");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("i18n.toml"), "locales = [\"en\"]").unwrap();

        let found = find_config_file_from(&nested, Path::new("i18n.toml")).unwrap();
        assert_eq!(found, dir.path().join("i18n.toml"));
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file_from(dir.path(), &path), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file_from(dir.path(), &path), Some(path));
    }

    #[test]
    fn test_find_config_directory_is_not_a_match() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("i18n.toml")).unwrap();
        let start = dir.path().join("i18n.toml");
        // only a directory with that name exists below the temp root
        let found = find_config_file_from(&start, Path::new("i18n.toml"));
        assert!(found.is_none_or(|p| !p.starts_with(dir.path())));
    }
}
