//! Platform conventions: executable names, environment variable names and
//! the conventional system install roots probed for JDKs.

use std::path::{Path, PathBuf};

pub const JAVA_HOME_VAR: &str = "JAVA_HOME";
pub const PATH_VAR: &str = "PATH";

pub fn java_binary_name() -> &'static str {
    if cfg!(windows) { "java.exe" } else { "java" }
}

pub fn path_separator() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

/// Conventional system-wide JDK install roots, probed after the managed
/// directory. Roots that do not exist contribute zero candidates.
pub fn system_install_roots() -> Vec<PathBuf> {
    if cfg!(windows) {
        vec![
            PathBuf::from(r"C:\Program Files\Java"),
            PathBuf::from(r"C:\Program Files (x86)\Java"),
        ]
    } else if cfg!(target_os = "macos") {
        vec![PathBuf::from("/Library/Java/JavaVirtualMachines")]
    } else {
        vec![PathBuf::from("/usr/lib/jvm"), PathBuf::from("/opt/java")]
    }
}

/// Normalize a path into a comparison key: case-insensitive with trailing
/// separators stripped, matching how `JAVA_HOME` values are compared.
pub fn normalize_path_key(path: &Path) -> String {
    let text = path.to_string_lossy().to_lowercase();
    text.trim_end_matches(['/', '\\']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_binary_name() {
        #[cfg(windows)]
        assert_eq!(java_binary_name(), "java.exe");
        #[cfg(not(windows))]
        assert_eq!(java_binary_name(), "java");
    }

    #[test]
    fn test_normalize_path_key_strips_trailing_separators() {
        assert_eq!(
            normalize_path_key(Path::new("/home/dev/.jdks/openjdk-17/")),
            "/home/dev/.jdks/openjdk-17"
        );
        assert_eq!(
            normalize_path_key(Path::new(r"C:\Program Files\Java\jdk-17\")),
            r"c:\program files\java\jdk-17"
        );
    }

    #[test]
    fn test_normalize_path_key_is_case_insensitive() {
        assert_eq!(
            normalize_path_key(Path::new("/Home/Dev/.JDKS/openjdk-17")),
            normalize_path_key(Path::new("/home/dev/.jdks/OPENJDK-17"))
        );
    }

    #[test]
    fn test_system_install_roots_not_empty() {
        assert!(!system_install_roots().is_empty());
    }
}
