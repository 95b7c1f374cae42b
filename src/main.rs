mod cli;
mod config;
mod error;
mod ops;
mod options;
mod platform;
mod resolver;
mod store;
mod template;
#[cfg(test)]
mod test_helpers;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;
use platform::RealRunner;
use resolver::SecretResolver;
use store::Gopass;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for resolved values.
    let filter = match cli.verbose {
        0 => "gopass_lookup=info",
        1 => "gopass_lookup=debug",
        _ => "gopass_lookup=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli.command {
        Command::Completions { shell } => {
            ops::completions::run(shell, &mut std::io::stdout())?;
        }
        command => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let executable = cli.executable.unwrap_or_else(|| config.executable.clone());
            let resolver = SecretResolver::new(Gopass::new(executable, RealRunner))
                .with_defaults(config.lookup_defaults());

            match command {
                Command::Lookup {
                    terms,
                    options,
                    length,
                    symbols,
                    regenerate,
                    list,
                    json,
                } => {
                    let flags = ops::lookup::Flags {
                        length,
                        symbols,
                        regenerate,
                        list,
                    };
                    let kwargs = ops::lookup::build_kwargs(&options, &flags);
                    ops::lookup::run(&resolver, &terms, &kwargs, json, &mut std::io::stdout())?;
                }
                Command::Render {
                    template,
                    vars,
                    output,
                } => {
                    ops::render::run(
                        resolver,
                        &template,
                        &vars,
                        output.as_deref(),
                        &mut std::io::stdout(),
                    )?;
                }
                Command::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
