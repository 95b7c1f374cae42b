//! Tera integration: the `gopass()` template function and file rendering.
//!
//! ```text
//! password = "{{ gopass(path="team/db") }}"
//! api_key  = "{{ gopass(path="team/api", length=48, symbols=true) }}"
//! {% set names = gopass(path="team", list=true) %}
//! {% for name in names %}{{ name }}
//! {% endfor %}
//! ```

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tera::{Tera, Value};
use tracing::{debug, trace};

use crate::platform::CommandRunner;
use crate::resolver::SecretResolver;

/// Name the function is registered under.
pub const FUNCTION_NAME: &str = "gopass";

/// Argument holding the term(s); every other argument is an option.
const PATH_ARG: &str = "path";

/// Register `gopass()` on `tera`, backed by `resolver`.
///
/// `path` may be a string (returns one result) or an array of strings
/// (returns an array of results in the same order).
pub fn register<R>(tera: &mut Tera, resolver: SecretResolver<R>)
where
    R: CommandRunner + Send + Sync + 'static,
{
    tera.register_function(FUNCTION_NAME, move |args: &HashMap<String, Value>| {
        call(&resolver, args)
    });
}

fn call<R: CommandRunner>(
    resolver: &SecretResolver<R>,
    args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let (terms, single) = match args.get(PATH_ARG) {
        Some(Value::String(path)) => (vec![path.clone()], true),
        Some(Value::Array(paths)) => {
            let terms = paths
                .iter()
                .map(|p| match p {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(tera::Error::msg(format!(
                        "`{FUNCTION_NAME}` expects `{PATH_ARG}` entries to be strings, got {other}"
                    ))),
                })
                .collect::<tera::Result<Vec<String>>>()?;
            (terms, false)
        }
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "`{FUNCTION_NAME}` expects `{PATH_ARG}` to be a string or an array, got {other}"
            )));
        }
        None => {
            return Err(tera::Error::msg(format!(
                "`{FUNCTION_NAME}` requires a `{PATH_ARG}` argument"
            )));
        }
    };

    let mut kwargs = args.clone();
    kwargs.remove(PATH_ARG);

    let mut resolved = resolver
        .resolve_kwargs(&terms, &kwargs)
        .map_err(|e| tera::Error::chain(format!("`{FUNCTION_NAME}` lookup failed"), e))?;

    let value = if single {
        match resolved.pop() {
            Some(one) => tera::to_value(one)?,
            None => Value::Null,
        }
    } else {
        tera::to_value(resolved)?
    };
    Ok(value)
}

/// Load template variables from TOML files.
///
/// Later files override earlier ones. Missing files are skipped.
pub fn load_vars(var_files: &[impl AsRef<Path>]) -> Result<HashMap<String, toml::Value>> {
    let mut vars = HashMap::new();
    for var_file in var_files {
        let path = var_file.as_ref();
        if !path.exists() {
            debug!("Vars file not found, skipping: {}", path.display());
            continue;
        }
        debug!("Loading vars from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vars file: {}", path.display()))?;
        let table: HashMap<String, toml::Value> = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse vars file: {}", path.display()))?;
        vars.extend(table);
    }
    Ok(vars)
}

/// Render `source` with `vars` in context and `gopass()` available.
pub fn render_str<R>(
    name: &str,
    source: &str,
    vars: &HashMap<String, toml::Value>,
    resolver: SecretResolver<R>,
) -> Result<String>
where
    R: CommandRunner + Send + Sync + 'static,
{
    let mut tera = Tera::default();
    // Secrets must come out verbatim whatever the file extension.
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, source)
        .with_context(|| format!("Failed to parse template: {name}"))?;
    register(&mut tera, resolver);

    let mut context = tera::Context::new();
    for (key, value) in vars {
        context.insert(key, value);
    }
    trace!("Tera context: {:?}", context);

    tera.render(name, &context)
        .with_context(|| format!("Failed to render template: {name}"))
}

/// Read a template file and render it.
pub fn render_file<R>(
    template: &Path,
    var_files: &[impl AsRef<Path>],
    resolver: SecretResolver<R>,
) -> Result<String>
where
    R: CommandRunner + Send + Sync + 'static,
{
    let source = std::fs::read_to_string(template)
        .with_context(|| format!("Failed to read template: {}", template.display()))?;
    let vars = load_vars(var_files)?;
    render_str(&template.display().to_string(), &source, &vars, resolver)
}
