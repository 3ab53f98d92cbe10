use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Write `s` to stdout exactly, without a trailing newline
pub fn print_raw(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(s.as_bytes())?;
    out.flush()
}

/// Non-fatal problem, on stderr
pub fn print_warning(message: impl Display) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}
