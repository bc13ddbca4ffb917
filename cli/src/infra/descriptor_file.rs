//! Filesystem implementation of the `DescriptorWriter` port.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::DescriptorWriter;

/// Writes descriptors as `tmp_<epoch-micros><postfix>.yml` under a directory
/// (the system temp dir in production).
///
/// The marketplace CLI may read the file after this process exits, so the
/// files are left in place. On unix they are created owner-only (`0o600`).
pub struct TempDescriptorWriter {
    dir: PathBuf,
}

impl TempDescriptorWriter {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer targeting `std::env::temp_dir()`.
    #[must_use]
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl DescriptorWriter for TempDescriptorWriter {
    fn write(&self, contents: &str) -> Result<PathBuf> {
        let dir = std::path::absolute(&self.dir)
            .with_context(|| format!("resolving {}", self.dir.display()))?;
        let stamp = chrono::Utc::now().timestamp_micros();

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut postfix: u32 = 0;
        loop {
            let path = dir.join(format!("tmp_{stamp}{postfix}.yml"));
            match options.open(&path) {
                Ok(mut file) => {
                    file.write_all(contents.as_bytes())
                        .with_context(|| format!("writing descriptor {}", path.display()))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => postfix += 1,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("creating descriptor {}", path.display()));
                }
            }
        }
    }
}
