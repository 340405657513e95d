//! Lexical path helpers.
use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// A `..` at the root is dropped, matching how absolute paths resolve.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => result.push(component),
            },
            _ => result.push(component),
        }
    }
    result
}

/// `true` if `path` is `dir` or lies beneath it, compared component by
/// component after normalization (`/foo/bar` is not under `/foo/ba`).
#[must_use]
pub fn is_path_under(path: &Path, dir: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(dir))
}

/// Resolve a stored symlink value the way the OS would, relative to the
/// directory holding the link, then normalize it lexically.
#[must_use]
pub fn resolve_link_value(link: &Path, value: &Path) -> PathBuf {
    let base = link.parent().unwrap_or_else(|| Path::new("/"));
    normalize_path(&base.join(value))
}

/// `path` relative to `base` for display, or the full path if it is not
/// beneath `base`.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map_or_else(|_| path.display().to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_simple() {
        assert_eq!(
            normalize_path(Path::new("/usr/local/bin")),
            PathBuf::from("/usr/local/bin")
        );
    }

    #[test]
    fn normalize_dots() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn under_uses_components_not_string_prefix() {
        assert!(is_path_under(Path::new("/foo/bar/x"), Path::new("/foo/bar")));
        assert!(is_path_under(Path::new("/foo/bar"), Path::new("/foo/bar")));
        assert!(!is_path_under(Path::new("/foo/bar"), Path::new("/foo/ba")));
        assert!(!is_path_under(Path::new("/foo/barn/x"), Path::new("/foo/bar")));
    }

    #[test]
    fn under_rejects_traversal() {
        assert!(!is_path_under(
            Path::new("/dotfiles/zsh/../../etc/passwd"),
            Path::new("/dotfiles/zsh")
        ));
    }

    #[test]
    fn resolve_relative_link_value() {
        assert_eq!(
            resolve_link_value(
                Path::new("/home/u/.config/x"),
                Path::new("../../dotfiles/zsh/x")
            ),
            PathBuf::from("/home/dotfiles/zsh/x")
        );
    }

    #[test]
    fn resolve_absolute_link_value() {
        assert_eq!(
            resolve_link_value(Path::new("/home/u/x"), Path::new("/dotfiles/zsh/x")),
            PathBuf::from("/dotfiles/zsh/x")
        );
    }

    #[test]
    fn display_relative_strips_base() {
        assert_eq!(
            display_relative(Path::new("/home/u/.zshrc"), Path::new("/home/u")),
            ".zshrc"
        );
        assert_eq!(
            display_relative(Path::new("/etc/x"), Path::new("/home/u")),
            "/etc/x"
        );
    }
}
