use console::style;

use crate::types::RiskLevel;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Dim metadata line (file names, counts, timestamps).
    pub fn meta(&self, message: &str) {
        println!("{}", style(message).dim());
    }

    /// Risk level in its conventional color: green / yellow / red.
    pub fn risk(&self, level: RiskLevel) -> String {
        let label = level.as_str();
        match level {
            RiskLevel::Low => style(label).green().to_string(),
            RiskLevel::Medium => style(label).yellow().to_string(),
            RiskLevel::High => style(label).red().bold().to_string(),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
