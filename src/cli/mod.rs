//! CLI module - Command-line interface for Cookbook
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Cookbook - recipe discovery server
#[derive(Parser)]
#[command(name = "cookbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Empty the response cache
    ClearCache,

    /// List the recipes a user has saved
    Saved {
        /// Email the user registered with
        email: String,
    },

    /// Create a user account
    Register {
        email: String,
        name: String,
        #[arg(long)]
        password: String,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["cookbook"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn register_requires_password_flag() {
        assert!(Cli::try_parse_from(["cookbook", "register", "a@b.co", "Ann"]).is_err());

        let cli = Cli::try_parse_from([
            "cookbook",
            "register",
            "a@b.co",
            "Ann",
            "--password",
            "hunter22",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Register { ref email, ref name, ref password })
                if email == "a@b.co" && name == "Ann" && password == "hunter22"
        ));
    }

    #[test]
    fn clear_cache_is_kebab_case() {
        let cli = Cli::try_parse_from(["cookbook", "clear-cache"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ClearCache)));
    }
}
