//! Strict streaming token scanner for format validation.
//!
//! Verifies that textual data conforms *exactly* to a declared token
//! grammar: bounded words over a byte class, bounded canonical decimal
//! integers, byte-exact delimiters, and an explicit end-of-stream
//! confirmation. Built for automated judging of algorithmic-problem
//! submissions and for test-data generators, where "almost right" output
//! must be rejected.
//!
//! There is no declarative grammar language: a grammar is the ordered
//! sequence of scanner calls the validator writes.
//!
//! ```no_run
//! use verd_scan::{ByteClass, Delim, ScanError, TokenReader};
//!
//! fn validate() -> Result<(), ScanError> {
//!     let mut input = TokenReader::from_path("input.txt")?;
//!     let n = input.read_int(1i32, 100_000, Delim::NEWLINE, "n")?;
//!     for i in 0..n {
//!         let context = format!("element {} of {n}", i + 1);
//!         input.read_int(
//!             -1_000_000_000i32,
//!             1_000_000_000,
//!             Delim::array(i as usize, n as usize),
//!             &context,
//!         )?;
//!     }
//!     input.confirm_eof()
//! }
//! ```
//!
//! # Failure model
//!
//! Every violation is immediately fatal to the validation pass: scan
//! errors release the reader's source and propagate as [`ScanError`]
//! values to one top-level driver, which owns the `NG` emission and the
//! process exit. This crate never calls `process::exit` itself.
//!
//! This crate is standalone: zero verd_* dependencies, so generators and
//! external tools can use the scanner without pulling in the process
//! harness.

mod bounds;
mod byte_class;
mod delim;
mod error;
mod position;
mod reader;

pub use bounds::ScanInt;
pub use byte_class::ByteClass;
pub use delim::Delim;
pub use error::{ScanError, Violation};
pub use position::{NewlineMode, Position};
pub use reader::TokenReader;
