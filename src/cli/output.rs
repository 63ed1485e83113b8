use std::fmt;

use colored::Colorize;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO",
        MessageKind::Success => "SUCCESS",
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
    }
}

fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = format!("{}: {}", label(kind), message);
    match kind {
        MessageKind::Info => text.normal().to_string(),
        MessageKind::Success => text.green().to_string(),
        MessageKind::Warning => text.yellow().to_string(),
        MessageKind::Error => text.red().to_string(),
    }
}

pub fn print_info(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Info, message));
}

pub fn print_success(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Success, message));
}

pub fn print_warning(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Warning, message));
}

pub fn print_error(message: impl fmt::Display) {
    eprintln!("{}", styled(MessageKind::Error, message));
}

pub fn print_section(title: impl fmt::Display) {
    println!("\n=== {} ===", title);
}
