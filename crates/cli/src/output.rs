//! Terminal output helpers

use colored::{ColoredString, Colorize};
use console_core::LanguageSet;
use console_ir::ValidationResult;
use serde::Serialize;

pub fn header(text: &str) {
    println!("{}", text.bold().underline());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message);
}

pub fn dim(text: &str) -> ColoredString {
    text.dimmed()
}

/// Status tag for a model or instance row
pub fn tag(label: &str) -> ColoredString {
    format!("[{}]", label).yellow()
}

/// `[ru, en]` with every code highlighted
pub fn languages(set: &LanguageSet) -> String {
    let codes: Vec<String> = set.iter().map(|l| l.code().cyan().to_string()).collect();
    format!("[{}]", codes.join(", "))
}

/// One checklist line for a form field
pub fn field_status(key: &str, complete: bool, detail: &str) {
    let mark = if complete {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {} {}", mark, key.bold(), dim(detail));
}

/// Every error, then every warning, of a validation result
pub fn diagnostics(result: &ValidationResult) {
    for error in &result.errors {
        failure(&error.to_string());
    }
    for item in &result.warnings {
        warning(&item.to_string());
    }
}

/// Pretty JSON on stdout
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
