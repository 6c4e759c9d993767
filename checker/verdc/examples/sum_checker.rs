//! Output checker for a toy sum problem.
//!
//! Input format: a line `n` (1..=1000), then a line of `n` space-separated
//! integers in [-1000000, 1000000]. Output format: one line holding their
//! sum. Run as `sum_checker <input> <output>`.

use verdc::{cli, Delim};

fn main() {
    verdc::run(|| {
        let (mut input, mut output) = cli::output_checker_readers();

        let n = input.read_int(1i64, 1000, Delim::NEWLINE, "n")?;
        let mut sum = 0i64;
        for i in 0..n {
            let delim = if i + 1 < n { Delim::SPACE } else { Delim::NEWLINE };
            let context = format!("element {} of {n}", i + 1);
            sum += input.read_int(-1_000_000i64, 1_000_000, delim, &context)?;
        }
        input.confirm_eof()?;

        let claimed = output.read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "sum")?;
        output.confirm_eof()?;

        if claimed != sum {
            verdc::reject(format!("wrong sum: expected {sum}, got {claimed}"));
        }
        Ok(())
    })
}
