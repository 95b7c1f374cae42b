//! `lookup`: resolve terms and print the results.
//!
//! Plain output prints one value per line; in list mode every name gets its
//! own line. `--json` prints the results as a JSON array aligned with the
//! terms.

use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;
use tera::Value;
use tracing::debug;

use crate::platform::CommandRunner;
use crate::resolver::SecretResolver;

/// Typed `lookup` flags. Set flags override `-o` entries for the same key.
#[derive(Debug, Default)]
pub struct Flags {
    pub length: Option<u32>,
    pub symbols: bool,
    pub regenerate: bool,
    pub list: bool,
}

/// Build the keyword mapping handed to the resolver.
///
/// `-o` values stay strings so they go through the same validation as
/// template arguments.
pub fn build_kwargs(options: &[(String, String)], flags: &Flags) -> HashMap<String, Value> {
    let mut kwargs: HashMap<String, Value> = options
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();

    if let Some(length) = flags.length {
        kwargs.insert("length".to_string(), Value::from(length));
    }
    for (key, set) in [
        ("symbols", flags.symbols),
        ("regenerate", flags.regenerate),
        ("list", flags.list),
    ] {
        if set {
            kwargs.insert(key.to_string(), Value::Bool(true));
        }
    }
    kwargs
}

pub fn run<R: CommandRunner>(
    resolver: &SecretResolver<R>,
    terms: &[String],
    kwargs: &HashMap<String, Value>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    debug!("Resolving {} term(s)", terms.len());
    let results = resolver.resolve_kwargs(terms, kwargs)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    } else {
        for line in results.iter().flat_map(|r| r.lines()) {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(())
}
