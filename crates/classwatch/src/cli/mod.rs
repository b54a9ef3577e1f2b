//! Command-line interface for classwatch.
//!
//! This module provides the CLI structure for the `classwatch` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ServeCommand};

/// classwatch - Classroom incident dashboard
///
/// Receives behavioral incidents from classroom monitoring agents and serves
/// a login-protected dashboard with per-class logs and risk rankings.
#[derive(Debug, Parser)]
#[command(name = "classwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "classwatch");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["classwatch", "serve"]).verbosity(), Verbosity::Normal);
        assert_eq!(
            parse(&["classwatch", "-v", "serve"]).verbosity(),
            Verbosity::Verbose
        );
        assert_eq!(
            parse(&["classwatch", "-vv", "serve"]).verbosity(),
            Verbosity::Trace
        );
        assert_eq!(
            parse(&["classwatch", "-q", "-v", "serve"]).verbosity(),
            Verbosity::Quiet
        );
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = parse(&["classwatch", "serve", "--host", "127.0.0.1", "-p", "9000"]);
        match cli.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(cmd.port, Some(9000));
            }
            Command::Config(_) => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_config_show_json() {
        let cli = parse(&["classwatch", "config", "show", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_config_validate_file() {
        let cli = parse(&["classwatch", "config", "validate", "-f", "/tmp/c.toml"]);
        match cli.command {
            Command::Config(ConfigCommand::Validate { file }) => {
                assert_eq!(file, Some(PathBuf::from("/tmp/c.toml")));
            }
            _ => panic!("expected config validate"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["classwatch", "-c", "/custom/config.toml", "config", "path"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(Cli::try_parse_from(["classwatch", "serve", "-p", "70000"]).is_err());
    }
}
