//! Error handling utilities

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `JanitorError`: shows the user message, plus the full chain in verbose mode
/// - For other errors: shows the error and its chain in verbose mode, exits 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::JanitorError;

    let exit_code = if let Some(janitor_err) = error.downcast_ref::<JanitorError>() {
        error!(code = janitor_err.code(), "Fatal error: {}", error);
        eprintln!("Error: {}", janitor_err.user_message());
        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", janitor_err.developer_message());
        }
        janitor_err.exit_code()
    } else {
        error!("Fatal error: {}", error);
        eprintln!("Error: {error}");
        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
        1
    };

    std::process::exit(exit_code)
}
