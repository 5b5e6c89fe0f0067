use std::{
    path::{Path, PathBuf},
    process::exit,
};

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Shortens paths under the current dir (`tests/B1.in`) and the home dir (`~/...`).
pub fn display_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let path = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| replace_homedir_to_tilde(path));
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn relative_paths_are_untouched() {
        assert_eq!(display_path("tests/B1.in"), "tests/B1.in");
        assert_eq!(display_path(current_dir().join("tests/B1.in")), "tests/B1.in");
    }
}
