//! Terminal output for the board: severity-flagged one-liners plus the
//! section headers between table blocks.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

fn flagged(color: &str, icon: &str, msg: &dyn fmt::Display) -> String {
    format!("{}{}{}{} {}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_BLUE, "ℹ️", &msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_GREEN, "✅", &msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", flagged(FG_YELLOW, "⚠️", &msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", flagged(FG_RED, "❌", &msg));
}

/// Bold heading above a block of the board or history view.
pub fn section(title: &str) {
    println!("{}{}{}", BOLD, title, RESET);
}
