use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gopass-lookup",
    about = "Resolve secrets from gopass, generating missing ones",
    version
)]
pub struct Cli {
    /// Override config file location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Secret-manager executable (overrides the config file)
    #[arg(long, global = true)]
    pub executable: Option<String>,

    /// Increase verbosity (-v = DEBUG, -vv = TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve secret paths and print their values
    Lookup {
        /// Secret paths to resolve
        #[arg(required = true)]
        terms: Vec<String>,

        /// Lookup option as KEY=VALUE (length, symbols, regenerate, list)
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        options: Vec<(String, String)>,

        /// Length of generated secrets
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        length: Option<u32>,

        /// Include symbols in generated secrets
        #[arg(long)]
        symbols: bool,

        /// Regenerate secrets before reading them
        #[arg(long)]
        regenerate: bool,

        /// List secret names under each path instead of reading values
        #[arg(long)]
        list: bool,

        /// Print results as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Render a template with the `gopass()` function available
    Render {
        /// Template file
        template: PathBuf,

        /// TOML file of template variables (repeatable, later files win)
        #[arg(long = "vars", value_name = "FILE")]
        vars: Vec<PathBuf>,

        /// Write to this file (mode 0600) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
