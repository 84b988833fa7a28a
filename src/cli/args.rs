//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// folio personal-site renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Site root directory (default: nearest folio.toml, else cwd)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<String>,

    /// Enable verbose output for debugging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scaffold a new site (never overwrites existing files)
    #[command(visible_alias = "i")]
    Init {
        /// Site directory (relative to current directory; default: here)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Name used in the starter content
        #[arg(short, long, default_value = "Your Name")]
        author: String,
    },

    /// Render the site once into the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Theme preset to render with (validated like ?theme=)
        #[arg(short, long)]
        theme: Option<String>,

        /// Clean output directory completely before building
        #[arg(short, long)]
        clean: bool,
    },

    /// Start the preview server with rebuild-on-change
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for auto-rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Validate the content document and template selectors
    #[command(visible_alias = "c")]
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_watch_flag_forms() {
        let cli = Cli::parse_from(["folio", "serve", "--watch", "false"]);
        let Commands::Serve { watch, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(watch, Some(false));

        let cli = Cli::parse_from(["folio", "serve", "-w"]);
        let Commands::Serve { watch, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(watch, Some(true));
    }

    #[test]
    fn test_build_theme_flag() {
        let cli = Cli::parse_from(["folio", "build", "--theme", "ocean"]);
        let Commands::Build { theme, clean } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(theme.as_deref(), Some("ocean"));
        assert!(!clean);
    }

    #[test]
    fn test_global_root_after_subcommand() {
        let cli = Cli::parse_from(["folio", "check", "--root", "~/site"]);
        assert_eq!(cli.root.as_deref(), Some("~/site"));
    }
}
