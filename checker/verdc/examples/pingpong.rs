//! Reactive checker for a toy handshake protocol.
//!
//! Spawns the subject program, sends `PING`, and requires the reply
//! `PONG` followed by end-of-output. Run as `pingpong <command..>`.

use verdc::{cli, ByteClass, Delim};

fn main() {
    verdc::run(|| {
        let mut subject = cli::reactive_interactor();

        subject.send("PING\n")?;
        subject.flush()?;

        let reply = subject
            .reader()
            .read_word(&ByteClass::UPPERCASE, 4, 4, Delim::NEWLINE, "reply")?;
        if reply != b"PONG" {
            verdc::reject("wrong reply: expected PONG");
        }

        subject.reader().confirm_eof()?;
        subject.shutdown()?;
        Ok(())
    })
}
