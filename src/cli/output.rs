//! Colored output helpers shared by the shell commands.

use colored::Colorize;
use std::fmt;

pub fn info(message: impl fmt::Display) {
    println!("{message}");
}

pub fn success(message: impl fmt::Display) {
    println!("{} {message}", "[ok]".green().bold());
}

pub fn warn(message: impl fmt::Display) {
    println!("{} {message}", "[!]".yellow().bold());
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {message}", "[x]".red().bold());
}

pub fn section(title: impl fmt::Display) {
    println!("{}", format!("=== {title} ===").bold());
}
