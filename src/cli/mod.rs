//! CLI module for the agent router
//!
//! Provides command-line interface parsing for the agent-router binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Agent Router - route natural-language queries to tools with a ReAct agent
#[derive(Parser, Debug)]
#[command(
    name = "agent-router",
    version,
    about = "Agent Router - ReAct query routing over weather, math and LLM tools",
    after_help = "EXAMPLES:\n    \
                  agent-router                          # Start the server\n    \
                  agent-router serve --port 9000        # Start on a custom port\n    \
                  agent-router ask \"What is 42 * 7?\"    # Answer one query locally\n    \
                  agent-router tools                    # List available tools"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "agent-router.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer a single query and print the JSON response
    Ask {
        /// The natural-language query
        query: String,
    },

    /// List the tools available to the agent
    Tools,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run, `serve` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            host: None,
            port: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["agent-router"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("agent-router.toml"));
        assert!(matches!(
            cli.command(),
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn test_serve_overrides() {
        let cli =
            Cli::try_parse_from(["agent-router", "serve", "--host", "0.0.0.0", "--port", "9000"])
                .unwrap();
        match cli.command() {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "agent-router",
            "ask",
            "What is 2 + 2?",
            "--no-color",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command(), Commands::Ask { query } if query == "What is 2 + 2?"));
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["agent-router", "ask"]).is_err());
    }
}
