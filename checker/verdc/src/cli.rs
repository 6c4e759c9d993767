//! Thin entry points for the two external validator modes.
//!
//! - Output-checker mode: two file-path arguments, each opened as a
//!   [`TokenReader`].
//! - Reactive/interactive mode: a command plus its arguments, spawned as
//!   the subject program behind an [`Interactor`].
//!
//! Both validate the argument count and print a usage line plus exit 1
//! on mismatch. The grammar itself is whatever scanner calls the
//! validator's `main` makes afterwards.

use verd_harness::Interactor;
use verd_scan::TokenReader;

use crate::driver;

/// Initialize stderr logging from `RUST_LOG` (default `warn`).
///
/// Logs go to stderr only: stdout is reserved for the verdict token.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Split output-checker argv into the two file paths.
fn checker_paths(args: &[String]) -> Option<(&str, &str)> {
    match args {
        [_, input, output] => Some((input, output)),
        _ => None,
    }
}

/// Split reactive argv into the subject command and its arguments.
fn reactive_command(args: &[String]) -> Option<(&str, &[String])> {
    match args {
        [_, command, rest @ ..] => Some((command, rest)),
        _ => None,
    }
}

fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("checker")
}

/// Output-checker entry: open `<input>` and `<output>` from argv.
///
/// Usage mismatch prints `usage: <prog> <input> <output>` and exits 1.
/// An unopenable file is an OS-resource failure (no `NG`).
pub fn output_checker_readers() -> (TokenReader, TokenReader) {
    let args: Vec<String> = std::env::args().collect();
    let Some((input, output)) = checker_paths(&args) else {
        eprintln!("usage: {} <input> <output>", program_name(&args));
        std::process::exit(1);
    };
    init_tracing();
    let open = |path: &str| match TokenReader::from_path(path) {
        Ok(reader) => reader,
        Err(err) => driver::fail(&err.into()),
    };
    (open(input), open(output))
}

/// Reactive entry: spawn the subject command from argv.
///
/// Usage mismatch prints `usage: <prog> <command..>` and exits 1.
/// Spawn failure is an OS-resource failure (no `NG`).
pub fn reactive_interactor() -> Interactor {
    let args: Vec<String> = std::env::args().collect();
    let Some((command, rest)) = reactive_command(&args) else {
        eprintln!("usage: {} <command..>", program_name(&args));
        std::process::exit(1);
    };
    init_tracing();
    match Interactor::spawn(command, rest) {
        Ok(interactor) => interactor,
        Err(err) => driver::fail(&err.into()),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests panic on unexpected state for clear failure messages"
)]
mod tests {
    use super::{checker_paths, program_name, reactive_command};
    use pretty_assertions::assert_eq;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn checker_mode_requires_exactly_two_paths() {
        assert_eq!(
            checker_paths(&argv(&["checker", "in.txt", "out.txt"])),
            Some(("in.txt", "out.txt"))
        );
        assert_eq!(checker_paths(&argv(&["checker", "in.txt"])), None);
        assert_eq!(checker_paths(&argv(&["checker"])), None);
        assert_eq!(
            checker_paths(&argv(&["checker", "a", "b", "c"])),
            None
        );
    }

    #[test]
    fn reactive_mode_requires_a_command() {
        let args = argv(&["interactor", "subject", "--level", "3"]);
        let (command, rest) = reactive_command(&args).expect("command expected");
        assert_eq!(command, "subject");
        assert_eq!(rest, &argv(&["--level", "3"])[..]);

        assert_eq!(reactive_command(&argv(&["interactor"])), None);
    }

    #[test]
    fn program_name_falls_back_when_argv_is_empty() {
        assert_eq!(program_name(&[]), "checker");
        assert_eq!(program_name(&argv(&["my-checker"])), "my-checker");
    }
}
