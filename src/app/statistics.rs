//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProbeErrorKind, ProcessingStats};
use crate::walker::{RedirectKind, Terminal};

/// Prints walk outcomes, redirect kinds and failure counts to the log.
pub fn print_statistics(stats: &ProcessingStats) {
    let total_walks = stats.total_walks();
    if total_walks > 0 {
        info!("Walk Outcomes ({} total):", total_walks);
        for terminal in Terminal::iter() {
            let count = stats.get_terminal_count(terminal);
            if count > 0 {
                info!("   {}: {}", terminal.as_str(), count);
            }
        }
    }

    let total_redirects = stats.total_redirects();
    if total_redirects > 0 {
        info!("Redirect Hops ({} total):", total_redirects);
        for kind in RedirectKind::iter().filter(RedirectKind::is_redirect) {
            let count = stats.get_redirect_kind_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    let total_probe_errors = stats.total_probe_errors();
    if total_probe_errors > 0 {
        info!("Probe Failures ({} total):", total_probe_errors);
        for kind in ProbeErrorKind::iter() {
            let count = stats.get_probe_error_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    let total_errors = stats.total_errors();
    if total_errors > 0 {
        info!("Item Errors ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}
