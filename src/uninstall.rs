//! Removal of an installed JDK. The one hard rule: never delete the
//! active installation.

use crate::error::{JdkmanError, Result};
use crate::models::InstallationRecord;
use std::fs;
use std::io::ErrorKind;

/// Remove the installation behind `record`.
///
/// The active check happens before any filesystem mutation, so a refusal
/// leaves the installation fully intact. Deletion itself is recursive and
/// not transactional; an interrupted removal can leave a partial tree
/// behind, which a later probe simply no longer reports (no runtime
/// executable, no candidate).
pub fn uninstall(record: &InstallationRecord) -> Result<()> {
    if record.is_active {
        return Err(JdkmanError::ActiveInstallation(record.identifier.clone()));
    }

    log::info!(
        "Removing {} at {}",
        record.identifier,
        record.install_path.display()
    );

    fs::remove_dir_all(&record.install_path).map_err(|e| {
        if e.kind() == ErrorKind::PermissionDenied {
            JdkmanError::PermissionDenied(format!(
                "Cannot remove {}: permission denied. Retry with elevated privileges",
                record.install_path.display()
            ))
        } else {
            e.into()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn record(path: &Path, is_active: bool) -> InstallationRecord {
        InstallationRecord {
            identifier: "openjdk-17".to_string(),
            install_path: path.to_path_buf(),
            display_version: "17.0.2".to_string(),
            display_name: "Java 17.0.2 (openjdk-17)".to_string(),
            is_active,
        }
    }

    #[test]
    fn test_uninstall_removes_directory() {
        let temp_dir = TempDir::new().unwrap();
        let jdk = temp_dir.path().join("openjdk-17");
        fs::create_dir_all(jdk.join("bin")).unwrap();
        fs::write(jdk.join("bin").join("java"), b"binary").unwrap();

        uninstall(&record(&jdk, false)).unwrap();
        assert!(!jdk.exists());
    }

    #[test]
    fn test_uninstall_refuses_active_installation() {
        let temp_dir = TempDir::new().unwrap();
        let jdk = temp_dir.path().join("openjdk-17");
        fs::create_dir_all(jdk.join("bin")).unwrap();

        let result = uninstall(&record(&jdk, true));
        assert!(matches!(result, Err(JdkmanError::ActiveInstallation(_))));
        // Refused before touching the filesystem.
        assert!(jdk.exists());
    }

    #[test]
    fn test_uninstall_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = uninstall(&record(&temp_dir.path().join("ghost"), false));
        assert!(matches!(result, Err(JdkmanError::Io(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_uninstall_permission_denied_maps_to_permission_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("locked");
        let jdk = parent.join("openjdk-17");
        fs::create_dir_all(&jdk).unwrap();
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o555)).unwrap();

        let result = uninstall(&record(&jdk, false));
        fs::set_permissions(&parent, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(e) => assert!(e.requires_permission()),
            Ok(()) => panic!("expected permission failure"),
        }
    }
}
