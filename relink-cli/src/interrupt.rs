//! Ctrl-C handling.
//!
//! The first Ctrl-C only raises [`flag`]; the running operation finishes the
//! link it is on and stops. A second Ctrl-C while the first is pending exits
//! immediately with the interrupt exit code.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CliError;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// The process-wide interrupt flag.
pub fn flag() -> &'static AtomicBool {
    &INTERRUPTED
}

/// Raise the flag, returning whether it was already raised.
fn record(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}

/// Install the Ctrl-C handler.
pub fn install() {
    let result = ctrlc::set_handler(|| {
        if record(&INTERRUPTED) {
            eprintln!("Operation cancelled by user");
            std::process::exit(CliError::Interrupted.exit_code());
        }
    });
    if let Err(e) = result {
        eprintln!("Warning: could not install interrupt handler: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_interrupt_is_reported_as_pending() {
        let flag = AtomicBool::new(false);
        assert!(!record(&flag));
        assert!(flag.load(Ordering::SeqCst));
        assert!(record(&flag));
    }
}
