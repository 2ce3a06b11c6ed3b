//! sqlpress command line interface
//!
//! Formats SQL from files or stdin. Style options come from a TOML
//! configuration file or individual flags; `--check` makes the exit code
//! report whether the inputs were already formatted.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sqlpress_core::SqlDialect;
use sqlpress_engine::{FormatterConfig, SqlFormatter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sqlpress", version, about = "SQL pretty-printer")]
struct Cli {
    /// SQL files to format; reads stdin when none are given
    files: Vec<PathBuf>,

    /// SQL dialect used for parsing and identifier quoting
    #[arg(long, env = "SQLPRESS_DIALECT", default_value = "sqlite")]
    dialect: SqlDialect,

    /// Style configuration file (TOML); omitted options keep their defaults
    #[arg(long, value_name = "FILE", env = "SQLPRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Spaces per indentation step
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Emit keywords in lowercase
    #[arg(long)]
    lowercase_keywords: bool,

    /// Quote every identifier, not only the ones that need it
    #[arg(long)]
    wrap_names: bool,

    /// Start from the compact preset
    #[arg(long, conflicts_with_all = ["expanded", "config"])]
    compact: bool,

    /// Start from the expanded preset
    #[arg(long, conflicts_with = "config")]
    expanded: bool,

    /// Rewrite files in place instead of printing to stdout
    #[arg(long, conflicts_with = "check")]
    write: bool,

    /// Exit non-zero if any input is not already formatted
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("sqlpress: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every input was clean; only `--check` can make it false
fn run(cli: &Cli) -> Result<bool> {
    let formatter = SqlFormatter::new(build_config(cli)?).with_dialect(cli.dialect);

    if cli.files.is_empty() {
        if cli.write {
            bail!("--write needs file arguments");
        }
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        let formatted = formatter.format(&input)?;
        if cli.check {
            return Ok(formatted == input);
        }
        io::stdout().write_all(formatted.as_bytes())?;
        return Ok(true);
    }

    let mut clean = true;
    for path in &cli.files {
        let input =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let formatted = formatter
            .format(&input)
            .with_context(|| format!("formatting {}", path.display()))?;
        if cli.check {
            if formatted != input {
                println!("{}", path.display());
                clean = false;
            }
        } else if cli.write {
            if formatted != input {
                fs::write(path, &formatted)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        } else {
            io::stdout().write_all(formatted.as_bytes())?;
        }
    }
    Ok(clean)
}

fn build_config(cli: &Cli) -> Result<FormatterConfig> {
    let mut config = if let Some(path) = &cli.config {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else if cli.compact {
        FormatterConfig::compact()
    } else if cli.expanded {
        FormatterConfig::expanded()
    } else {
        FormatterConfig::default()
    };

    if let Some(indent) = cli.indent {
        config.indent_size = indent;
    }
    if cli.lowercase_keywords {
        config.uppercase_keywords = false;
    }
    if cli.wrap_names {
        config.always_wrap_names = true;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_layer_over_the_chosen_preset() {
        let cli = Cli::parse_from(["sqlpress", "--compact", "--indent", "8", "--lowercase-keywords"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.indent_size, 8);
        assert!(!config.uppercase_keywords);
    }
}
