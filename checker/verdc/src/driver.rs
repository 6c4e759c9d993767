//! The single point of process termination and `NG` emission.
//!
//! Library code (scanner, harness) propagates errors as `Result`; only
//! this driver writes the verdict and exits. Keeping the fail-fast exit
//! in one place preserves the "abort on first detected defect" semantics
//! without scattering termination calls through library code.
//!
//! # Outcome protocol
//!
//! - Grammar violation: diagnostic to stderr, the literal line `NG` to
//!   stdout, exit status 1.
//! - OS-resource or harness failure (spawn, open, wait, abnormal child
//!   exit): diagnostic to stderr, exit status 1, *no* `NG` token, since
//!   the data was never proven wrong.
//! - Full success: exit status 0, nothing printed.

use thiserror::Error;
use verd_harness::HarnessError;
use verd_scan::ScanError;

/// Any failure a validation pass can produce.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

impl CheckError {
    /// `true` if this failure indicts the data (answered with `NG`),
    /// `false` for harness/OS failures (no verdict token).
    pub fn is_grammar(&self) -> bool {
        match self {
            CheckError::Scan(e) => e.is_grammar(),
            CheckError::Harness(_) => false,
        }
    }
}

/// Result alias for validator bodies.
pub type CheckResult<T = ()> = Result<T, CheckError>;

/// Report a failure per the outcome protocol and exit with status 1.
pub fn fail(err: &CheckError) -> ! {
    eprintln!("{err}");
    if err.is_grammar() {
        println!("NG");
    }
    std::process::exit(1);
}

/// Run a validator body to completion and exit with the protocol status.
///
/// The body returns `Ok(())` only after confirming end-of-stream on every
/// reader it opened; any error exits through [`fail`].
pub fn run(body: impl FnOnce() -> CheckResult) -> ! {
    match body() {
        Ok(()) => std::process::exit(0),
        Err(err) => fail(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::CheckError;
    use verd_harness::HarnessError;
    use verd_scan::{ScanError, Violation};

    #[test]
    fn grammar_failures_earn_the_ng_token() {
        let err = CheckError::from(ScanError::Grammar {
            name: "out.txt".to_string(),
            line: 1,
            col: 1,
            kind: "int",
            context: "n".to_string(),
            reason: Violation::NotAnInteger,
        });
        assert!(err.is_grammar());
    }

    #[test]
    fn os_failures_do_not() {
        let io = CheckError::from(ScanError::Io {
            name: "out.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert!(!io.is_grammar());

        let spawn = CheckError::from(HarnessError::Spawn {
            program: "subject".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert!(!spawn.is_grammar());
    }

    #[test]
    fn messages_pass_through_transparently() {
        let err = CheckError::from(ScanError::NotEof {
            name: "out.txt".to_string(),
            line: 2,
            col: 1,
        });
        assert_eq!(
            err.to_string(),
            "out.txt(2,1): error reading EOF: not an EOF"
        );
    }
}
