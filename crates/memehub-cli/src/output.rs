use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Print `text` in text mode, `value` as JSON in JSON mode.
pub fn print_either<T: Serialize>(value: &T, text: &str) -> anyhow::Result<()> {
    if is_json() {
        return print(value);
    }
    println!("{text}");
    Ok(())
}

/// User-visible notice on stderr, highlighted when the terminal supports it.
pub fn notice(msg: &str) {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = write!(err, "notice:");
    let _ = err.reset();
    let _ = writeln!(err, " {msg}");
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}
