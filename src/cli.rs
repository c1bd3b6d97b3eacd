//! Command-line interface for markscan.
//!
//! Every subcommand reads lines from the given files (or stdin) and prints
//! one result line per input line.

use clap::{Args, Parser, Subcommand};
use markscan_config::{Config, ScanConfig};
use markscan_core::{MarkscanError, Result};
use std::path::PathBuf;

/// Markscan - byte-level Markdown scanning primitives on the command line.
#[derive(Parser, Debug)]
#[command(
    name = "mscan",
    author = "Markscan Contributors",
    version,
    about = "Run markscan's escaping, reference and delimiter scanners over text",
    arg_required_else_help = true,
    after_help = "Examples:\n  \
                  echo 'a b&amp;c' | mscan url-escape\n  \
                  mscan attributes README.md\n  \
                  mscan closure --open '(' --close ')' links.txt\n  \
                  mscan -c custom.toml closure --open '[' --close ']' --no-nesting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn", global = true)]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

/// Input files shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Escape `"`, `&`, `<` and `>` as HTML entities
    EscapeHtml {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Remove backslashes before ASCII punctuation
    Unescape {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Resolve numeric and named character references
    Resolve {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Percent-encode each line as a link destination
    UrlEscape {
        /// Keep escapes and character references as written
        #[arg(long = "no-resolve")]
        no_resolve: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the attributes of a trailing `{...}` block
    Attributes {
        /// Let `\"` appear inside quoted values
        #[arg(long = "escaped-quotes")]
        escaped_quotes: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the offset of the delimiter closing an already-open pair
    Closure {
        /// Opening delimiter (a single byte)
        #[arg(long = "open", value_parser = parse_delimiter)]
        open: u8,

        /// Closing delimiter (a single byte)
        #[arg(long = "close", value_parser = parse_delimiter)]
        close: u8,

        /// Byte offset where scanning starts, just after the opener
        #[arg(long = "from", default_value = "0")]
        from: usize,

        /// Do not treat backtick runs as code spans
        #[arg(long = "no-code-spans")]
        no_code_spans: bool,

        /// Fail on a nested opener instead of counting depth
        #[arg(long = "no-nesting")]
        no_nesting: bool,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Report a bare URL or email address at the start of each line
    Autolink {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Command {
    /// Input files for this subcommand.
    pub fn input(&self) -> &InputArgs {
        match self {
            Command::EscapeHtml { input }
            | Command::Unescape { input }
            | Command::Resolve { input }
            | Command::UrlEscape { input, .. }
            | Command::Attributes { input, .. }
            | Command::Closure { input, .. }
            | Command::Autolink { input } => input,
        }
    }

    /// Apply command-line switches on top of the loaded scanner settings.
    pub fn apply_overrides(&self, scan: &mut ScanConfig) {
        match self {
            Command::UrlEscape { no_resolve, .. } => {
                if *no_resolve {
                    scan.resolve_references = false;
                }
            }
            Command::Attributes { escaped_quotes, .. } => {
                if *escaped_quotes {
                    scan.escaped_quotes = true;
                }
            }
            Command::Closure {
                no_code_spans,
                no_nesting,
                ..
            } => {
                if *no_code_spans {
                    scan.code_spans = false;
                }
                if *no_nesting {
                    scan.allow_nesting = false;
                }
            }
            _ => {}
        }
    }
}

/// Parse a delimiter argument, which must be exactly one byte.
fn parse_delimiter(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [c] => Ok(*c),
        _ => Err(MarkscanError::Input(format!(
            "delimiter must be a single byte, got {:?}",
            value
        ))),
    }
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_paths() {
        let cli = Cli::parse_from(["mscan", "--paths"]);
        assert!(cli.show_paths);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_parse_with_files() {
        let cli = Cli::parse_from(["mscan", "escape-html", "a.md", "b.md"]);
        let command = cli.command.unwrap();
        assert!(matches!(command, Command::EscapeHtml { .. }));
        assert_eq!(
            command.input().files,
            vec![PathBuf::from("a.md"), PathBuf::from("b.md")]
        );
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::parse_from(["mscan", "unescape", "-l", "debug", "-c", "x.toml"]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config, Some("x.toml".to_string()));
        assert!(cli.command.unwrap().input().files.is_empty());
    }

    #[test]
    fn test_cli_parse_closure() {
        let cli = Cli::parse_from([
            "mscan",
            "closure",
            "--open", "[",
            "--close", "]",
            "--from", "3",
            "--no-nesting",
        ]);
        match cli.command.unwrap() {
            Command::Closure {
                open,
                close,
                from,
                no_code_spans,
                no_nesting,
                ..
            } => {
                assert_eq!(open, b'[');
                assert_eq!(close, b']');
                assert_eq!(from, 3);
                assert!(!no_code_spans);
                assert!(no_nesting);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_long_delimiter() {
        let result = Cli::try_parse_from(["mscan", "closure", "--open", "((", "--close", ")"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("<").unwrap(), b'<');
        assert!(matches!(parse_delimiter(""), Err(MarkscanError::Input(_))));
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut scan = ScanConfig::default();
        let cli = Cli::parse_from(["mscan", "url-escape", "--no-resolve"]);
        cli.command.unwrap().apply_overrides(&mut scan);
        assert!(!scan.resolve_references);

        let mut scan = ScanConfig::default();
        let cli = Cli::parse_from(["mscan", "attributes", "--escaped-quotes"]);
        cli.command.unwrap().apply_overrides(&mut scan);
        assert!(scan.escaped_quotes);

        let mut scan = ScanConfig::default();
        let cli = Cli::parse_from(["mscan", "closure", "--open", "(", "--close", ")", "--no-code-spans"]);
        cli.command.unwrap().apply_overrides(&mut scan);
        assert!(!scan.code_spans);
        assert!(scan.allow_nesting);
    }

    #[test]
    fn test_flags_do_not_force_defaults() {
        // an unset flag leaves the configured value alone
        let mut scan = ScanConfig {
            resolve_references: false,
            ..ScanConfig::default()
        };
        let cli = Cli::parse_from(["mscan", "url-escape"]);
        cli.command.unwrap().apply_overrides(&mut scan);
        assert!(!scan.resolve_references);
    }
}
