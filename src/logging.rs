//! Logger setup for the CLI. Output goes to stderr without timestamps
//! so progress lines on stdout stay machine-readable.

/// Crate-scoped filter for a `-v` count (0=warn, 1=info, 2=debug,
/// 3+=trace). `RUST_LOG` still overrides the flag.
fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "jdkman=warn",
        1 => "jdkman=info",
        2 => "jdkman=debug",
        _ => "jdkman=trace",
    }
}

pub fn setup_logger(verbose: u8) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter_for(verbose)),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .format_target(false)
    .init();
}
