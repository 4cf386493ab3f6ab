//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::StoreFormat;

/// Output format for `--print-params`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// TOML, the format `--params` reads
    #[default]
    Toml,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for StoreFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => StoreFormat::Toml,
            FormatArg::Json => StoreFormat::Json,
            FormatArg::Yaml => StoreFormat::Yaml,
        }
    }
}

/// Terminal settings panel for circle, rectangle and label styles.
///
/// Style values are resolved from built-in defaults, then `--params`, then
/// GL_STYLE_<SECTION>__<FIELD> environment variables.
#[derive(Parser, Debug)]
#[command(name = "gl-style-editor")]
#[command(author, version, about)]
pub struct Cli {
    /// TOML file with style parameters, layered over the built-in defaults
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Resolve and validate parameters, print them and exit
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "toml")]
    pub print_params: Option<FormatArg>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Log file path (default: gl-style-editor.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn print_params_defaults_to_toml() {
        let cli = Cli::parse_from(["gl-style-editor", "--print-params"]);
        assert_eq!(cli.print_params, Some(FormatArg::Toml));

        let cli = Cli::parse_from(["gl-style-editor", "--print-params", "yaml"]);
        assert_eq!(cli.print_params, Some(FormatArg::Yaml));
        assert_eq!(cli.log_level, "info");
    }
}
