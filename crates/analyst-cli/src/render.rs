//! Terminal output

use analyst_b3::Report;
use std::io::{self, Write};
use termimad::MadSkin;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Clear the terminal and move the cursor home
pub fn clear_terminal(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{CLEAR_SCREEN}")?;
    out.flush()
}

/// Write the message that ends the run, meant for stderr
pub fn print_fatal(err: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(err, "{message}")?;
    err.flush()
}

/// Print the report: styled Markdown, plain Markdown, or pretty JSON
pub fn print_report(report: &Report, plain: bool) -> anyhow::Result<()> {
    match report {
        Report::Markdown(text) if !plain => {
            MadSkin::default().print_text(text);
        }
        other => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", other.render()?)?;
        }
    }
    Ok(())
}
