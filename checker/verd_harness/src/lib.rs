//! Interactive child-process harness for two-way validator sessions.
//!
//! An [`Interactor`] runs the subject program as a child with an
//! independent full-duplex byte channel: harness writes become the
//! child's standard input, the child's standard output is exposed as a
//! [`TokenReader`], and the child's own standard error passes through
//! unmodified. This enables "interactor" validation, where the checker
//! and the subject take turns over the two pipes.
//!
//! # Turn-taking
//!
//! Writes are buffered; the child does not necessarily see bytes until
//! [`flush`](Interactor::flush). The caller is responsible for the
//! write-flush-read discipline: an unflushed query plus a blocking read
//! on both sides is a deadlock, and nothing here will time out. Ordering
//! within one direction is guaranteed (bytes written before a flush are
//! visible, in order, on the other end); interleaving between the two
//! directions is whatever the turn-taking produces.
//!
//! # Teardown
//!
//! [`shutdown`](Interactor::shutdown) closes the write side first (so a
//! child blocked reading observes end-of-input), then waits for the
//! child. A nonzero exit status is its own fatal harness error, distinct
//! from any data/grammar failure already detected. Dropping an
//! un-shutdown Interactor performs the same sequence and panics on
//! abnormal exit, mirroring the reader's loud-disposal contract.

use std::ffi::OsStr;
use std::io::{BufWriter, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use thiserror::Error;
use verd_scan::TokenReader;

/// Failure at the harness level: OS resources or child lifecycle.
///
/// None of these are data defects, so the driver reports them without
/// emitting `NG`.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The child process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A pipe end the child was configured with is missing.
    #[error("failed to open a pipe to {program}")]
    Pipe { program: String },

    /// Writing to the child's input failed (typically the child closed
    /// its end and exited).
    #[error("failed to write to {program}: {source}")]
    Input {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child failed at the OS level.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child terminated with a nonzero status.
    #[error("{program}: child exited abnormally: {status}")]
    AbnormalExit { program: String, status: ExitStatus },
}

/// A spawned subject program plus both ends of its byte channel.
///
/// The harness exclusively owns the write end, the wrapped read end, and
/// the child handle, releasing them in a fixed order: close write end,
/// wait for exit, release handle.
#[derive(Debug)]
pub struct Interactor {
    child: Child,
    /// `Some` until the write side is closed.
    stdin: Option<BufWriter<ChildStdin>>,
    /// The child's stdout, scanned like any other source.
    reader: TokenReader,
    program: String,
    /// Set once the child has been waited on; suppresses the Drop path.
    waited: bool,
}

impl Interactor {
    /// Spawn `program` with `args`, wiring up both pipes.
    ///
    /// The child inherits this process's standard error. Spawn or pipe
    /// failure is fatal to the validation run.
    pub fn spawn<S, I, A>(program: S, args: I) -> Result<Self, HarnessError>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let name = program.as_ref().to_string_lossy().into_owned();
        let mut child = Command::new(program.as_ref())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                program: name.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| HarnessError::Pipe {
            program: name.clone(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| HarnessError::Pipe {
            program: name.clone(),
        })?;

        tracing::debug!(program = %name, pid = child.id(), "spawned subject process");

        Ok(Self {
            child,
            stdin: Some(BufWriter::new(stdin)),
            reader: TokenReader::new(name.clone(), stdout),
            program: name,
            waited: false,
        })
    }

    /// The scanner over the child's standard output.
    ///
    /// The usual reader contract applies: the caller must
    /// [`confirm_eof`](TokenReader::confirm_eof) before the Interactor is
    /// disposed, proving the child's entire output was validated.
    pub fn reader(&mut self) -> &mut TokenReader {
        &mut self.reader
    }

    /// Append bytes to the child's (buffered) input stream.
    ///
    /// The child will not necessarily see them until [`flush`](Self::flush).
    pub fn send(&mut self, data: impl AsRef<[u8]>) -> Result<(), HarnessError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(HarnessError::Input {
                program: self.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "input side already closed",
                ),
            });
        };
        stdin
            .write_all(data.as_ref())
            .map_err(|source| HarnessError::Input {
                program: self.program.clone(),
                source,
            })
    }

    /// Force delivery of buffered writes.
    ///
    /// Required before expecting any response from the child.
    pub fn flush(&mut self) -> Result<(), HarnessError> {
        match self.stdin.as_mut() {
            Some(stdin) => stdin.flush().map_err(|source| HarnessError::Input {
                program: self.program.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    /// Close the child's input without waiting for it to exit.
    ///
    /// A child that reads until end-of-input observes EOF after this.
    pub fn close_input(&mut self) {
        self.stdin = None;
    }

    /// Close the write side, wait for the child, and check its status.
    ///
    /// A nonzero exit is [`HarnessError::AbnormalExit`], reported even if
    /// every grammar check already passed.
    pub fn shutdown(mut self) -> Result<(), HarnessError> {
        self.waited = true;
        self.stdin = None;
        let status = self
            .child
            .wait()
            .map_err(|source| HarnessError::Wait {
                program: self.program.clone(),
                source,
            })?;
        tracing::debug!(program = %self.program, %status, "subject process exited");
        if status.success() {
            Ok(())
        } else {
            Err(HarnessError::AbnormalExit {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl Drop for Interactor {
    /// Same fixed teardown order as [`shutdown`](Self::shutdown), but as
    /// a loud guard: abnormal child exit at disposal panics (suppressed
    /// while already panicking, where it is reported to stderr instead).
    fn drop(&mut self) {
        if self.waited {
            return;
        }
        self.stdin = None;
        match self.child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                if std::thread::panicking() {
                    eprintln!("{}: child exited abnormally: {status}", self.program);
                } else {
                    panic!("{}: child exited abnormally: {status}", self.program);
                }
            }
            Err(e) => {
                if std::thread::panicking() {
                    eprintln!("{}: failed to wait for child: {e}", self.program);
                } else {
                    panic!("{}: failed to wait for child: {e}", self.program);
                }
            }
        }
    }
}
