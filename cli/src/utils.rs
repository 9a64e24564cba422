use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use fileshelf_business::Attachment;

/// Reads a local file into an upload payload, guessing its MIME type from the extension.
pub fn attachment_from_path(path: &Path) -> Result<Attachment> {
    let filename = path
        .file_name()
        .context("Invalid filename")?
        .to_string_lossy()
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    let data =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(Attachment {
        filename,
        mime_type,
        data,
    })
}

/// Resolves where a download is written.
///
/// A directory target receives the file under its service name. An existing
/// file is only replaced when `force` is set.
pub fn download_target(name: &str, output: Option<&Path>, force: bool) -> Result<PathBuf> {
    let local_name = Path::new(name)
        .file_name()
        .context("Invalid file name")?;

    let target = match output {
        Some(path) if path.is_dir() => path.join(local_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(local_name),
    };

    if target.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }
    Ok(target)
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}
