use crate::error::JdkmanError;

pub fn get_exit_code(error: &JdkmanError) -> i32 {
    match error {
        JdkmanError::ValidationError(_) | JdkmanError::ConfigError(_) => 2,

        JdkmanError::NotInstalled(_) | JdkmanError::CatalogIdNotFound(_) => 4,

        JdkmanError::PermissionDenied(_) => 13,

        JdkmanError::ActiveInstallation(_) | JdkmanError::OperationInProgress(_) => 16,

        JdkmanError::Download { .. } => 20,

        JdkmanError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => 13,

        _ => 1,
    }
}
