//! Colored output helpers for CLI

use crate::types::{QueryResponse, ToolDefinition};
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n",
                "Agent Router".bright_cyan().bold(),
                version.dimmed()
            );
        } else {
            println!("\n   Agent Router {}\n", version);
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message to stderr
    /// Print a startup or command failure to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    fn error_line(&self, message: &str) -> String {
        if self.colored {
            format!("  {} {}", "✗".red().bold(), message.red())
        } else {
            format!("  [ERROR] {}", message)
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    /// Print one `key: value` detail line under the banner.
    pub fn kv(&self, key: &str, value: &str) {
        println!("{}", self.kv_line(key, value));
    }

    fn kv_line(&self, key: &str, value: &str) -> String {
        if self.colored {
            format!("    {}: {}", key.dimmed(), value.bright_white())
        } else {
            format!("    {}: {}", key, value)
        }
    }

    /// Print the registered tools, one block per tool.
    pub fn tools(&self, tools: &[ToolDefinition]) {
        self.header("Tools");
        for tool in tools {
            if self.colored {
                println!("\n    {}", tool.name.bright_cyan().bold());
                println!("      {}", tool.description.dimmed());
            } else {
                println!("\n    {}", tool.name);
                println!("      {}", tool.description);
            }
        }
        println!();
    }

    /// Print a query response as the same JSON line the HTTP API emits.
    pub fn response(&self, response: &QueryResponse) -> serde_json::Result<()> {
        let line = serde_json::to_string(response)?;
        if self.colored {
            println!("{}", line.bright_white());
        } else {
            println!("{}", line);
        }
        Ok(())
    }
}
