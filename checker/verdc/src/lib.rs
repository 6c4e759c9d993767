//! Driver and entry points for strict format validators.
//!
//! A validator is an ordinary `main` that obtains readers (or an
//! interactor) from [`cli`], describes its grammar as a sequence of
//! scanner calls, and lets [`run`] translate the outcome into the
//! judge protocol:
//!
//! ```no_run
//! use verdc::{cli, Delim};
//!
//! fn main() {
//!     verdc::run(|| {
//!         let (mut input, mut output) = cli::output_checker_readers();
//!         let n = input.read_int(1i32, 100, Delim::NEWLINE, "n")?;
//!         input.confirm_eof()?;
//!         for i in 0..n {
//!             let context = format!("answer {} of {n}", i + 1);
//!             output.read_int(0i64, 1_000_000_000, Delim::NEWLINE, &context)?;
//!         }
//!         output.confirm_eof()?;
//!         Ok(())
//!     })
//! }
//! ```
//!
//! On any violation the process prints the diagnostic to stderr, the
//! line `NG` to stdout, and exits 1; on success it exits 0.

pub mod cli;
pub mod driver;

pub use driver::{fail, run, CheckError, CheckResult};

// Re-export the toolkit surface so validators need a single dependency.
pub use verd_harness::{HarnessError, Interactor};
pub use verd_scan::{ByteClass, Delim, NewlineMode, ScanError, TokenReader, Violation};

/// Reject the data with a checker-specific reason outside the token
/// grammar (for example a value-consistency check between input and
/// output). Prints the reason to stderr, `NG` to stdout, and exits 1.
pub fn reject(reason: impl std::fmt::Display) -> ! {
    eprintln!("{reason}");
    println!("NG");
    std::process::exit(1);
}
