use crate::error::JdkmanError;
use std::error::Error;

/// Format an error together with its source chain and a usage hint.
pub fn format_error_chain(error: &JdkmanError) -> String {
    let mut output = format!("Error: {error}");

    let mut source = error.source();
    while let Some(cause) = source {
        output.push_str(&format!("\nCaused by: {cause}"));
        source = cause.source();
    }

    if let Some(suggestion) = suggestion_for(error) {
        output.push_str(&format!("\n\n{suggestion}"));
    }

    output
}

/// Format an error for terminal display with ANSI colors.
pub fn format_error_with_color(error: &JdkmanError, use_color: bool) -> String {
    let red = if use_color { "\x1b[31m" } else { "" };
    let yellow = if use_color { "\x1b[33m" } else { "" };
    let reset = if use_color { "\x1b[0m" } else { "" };
    let bold = if use_color { "\x1b[1m" } else { "" };

    let mut output = format!("{red}{bold}Error:{reset} {error}\n");

    let mut source = error.source();
    while let Some(cause) = source {
        output.push_str(&format!("Caused by: {cause}\n"));
        source = cause.source();
    }

    if let Some(suggestion) = suggestion_for(error) {
        output.push_str(&format!("\n{yellow}{bold}Hint:{reset} {suggestion}\n"));
    }

    if use_color && !output.is_empty() {
        output.push_str(reset);
    }

    output
}

fn suggestion_for(error: &JdkmanError) -> Option<String> {
    match error {
        JdkmanError::CatalogIdNotFound(_) => {
            Some("Run 'jdkman available' to see installable versions.".to_string())
        }
        JdkmanError::NotInstalled(_) => {
            Some("Run 'jdkman list' to see installed versions.".to_string())
        }
        JdkmanError::Download { url, .. } => Some(format!(
            "The download could not be completed automatically. Download the archive manually \
             from {url} and extract it into the managed directory."
        )),
        JdkmanError::ActiveInstallation(_) => Some(
            "Activate a different version with 'jdkman use <id>' before uninstalling this one."
                .to_string(),
        ),
        _ if error.requires_permission() => {
            Some("Retry the command with elevated privileges.".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_chain_includes_hint() {
        let err = JdkmanError::CatalogIdNotFound("openjdk-99".to_string());
        let formatted = format_error_chain(&err);
        assert!(formatted.starts_with("Error:"));
        assert!(formatted.contains("jdkman available"));
    }

    #[test]
    fn test_manual_download_hint_carries_url() {
        let err = JdkmanError::Download {
            url: "https://example.com/jdk.zip".to_string(),
            reason: "timeout".to_string(),
        };
        let formatted = format_error_chain(&err);
        assert!(formatted.contains("https://example.com/jdk.zip"));
    }

    #[test]
    fn test_color_toggle() {
        let err = JdkmanError::Extract("truncated".to_string());
        let plain = format_error_with_color(&err, false);
        assert!(!plain.contains("\x1b["));

        let colored = format_error_with_color(&err, true);
        assert!(colored.contains("\x1b[31m"));
    }
}
