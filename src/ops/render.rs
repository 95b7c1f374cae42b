//! `render`: render a template file with `gopass()` available.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::platform::CommandRunner;
use crate::resolver::SecretResolver;
use crate::template;

pub fn run<R>(
    resolver: SecretResolver<R>,
    template_path: &Path,
    var_files: &[PathBuf],
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()>
where
    R: CommandRunner + Send + Sync + 'static,
{
    let rendered = template::render_file(template_path, var_files, resolver)?;

    match output {
        Some(path) => {
            write_private(path, rendered.as_bytes())?;
            info!("Rendered {} to {}", template_path.display(), path.display());
        }
        None => {
            out.write_all(rendered.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Write `contents` to `path`, readable by the owner only on Unix.
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    // `mode` only applies on creation; tighten an existing file too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set permissions: {}", path.display()))?;
    }

    file.write_all(contents)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
