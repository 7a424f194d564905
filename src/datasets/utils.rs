use std::{
    fs::{create_dir_all, remove_dir_all, rename},
    io::{Seek, SeekFrom},
    path::Path,
    time::Duration,
};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use tar::Archive;
use tempfile::TempDir;
use tracing::info;
use zip::ZipArchive;

pub struct RemoteFile {
    response: reqwest::blocking::Response,
    current_size: u64,
    pbar: Option<ProgressBar>,
}
impl RemoteFile {
    pub fn with_pbar(url: &str) -> Result<Self> {
        Self::with_config(url, 3600, true)
    }
    pub fn with_config(url: &str, timeout: u64, pbar: bool) -> Result<Self> {
        info!(url, "downloading");
        let client = reqwest::blocking::Client::new();
        let response = client
            .get(url)
            .timeout(Duration::from_secs(timeout))
            .send()?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;

        let pbar = if pbar {
            // servers do not always send a length; fall back to a spinner
            let pbar = match response.content_length() {
                Some(total_size) => {
                    let pbar = ProgressBar::new(total_size);
                    pbar.set_style(ProgressStyle::default_bar()
                        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")?
                        .progress_chars("#>-"));
                    pbar
                }
                None => ProgressBar::new_spinner(),
            };
            pbar.set_message(format!("Downloading {}", url));
            Some(pbar)
        } else {
            None
        };
        Ok(Self {
            response,
            current_size: 0,
            pbar,
        })
    }
    fn update(&mut self, size: usize) {
        self.current_size += size as u64;
        if let Some(pbar) = &self.pbar {
            pbar.set_position(self.current_size);
        }
    }
}

impl std::io::Read for RemoteFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let size = self.response.read(buf)?;
        self.update(size);
        Ok(size)
    }
}

impl Drop for RemoteFile {
    fn drop(&mut self) {
        if let Some(pbar) = &self.pbar {
            pbar.finish_and_clear();
        }
    }
}

pub enum CompressionFormat {
    Zip,
    Tgz,
}

pub fn download_and_extract<P: AsRef<Path>>(
    url: &str,
    path: P,
    format: CompressionFormat,
) -> Result<()> {
    let mut remote_file = RemoteFile::with_pbar(url)?;
    let mut archive = tempfile::tempfile()?;
    std::io::copy(&mut remote_file, &mut archive)?;
    archive.seek(SeekFrom::Start(0))?;
    extract(archive, path, format)
}

/// A scratch directory next to `dest`, so a finished download can be moved
/// into place with [`install_dir`].
pub fn staging_dir<P: AsRef<Path>>(dest: P) -> Result<TempDir> {
    let dest = dest.as_ref();
    let parent = dest
        .parent()
        .with_context(|| format!("{} has no parent directory", dest.display()))?;
    create_dir_all(parent)?;
    Ok(tempfile::Builder::new().prefix(".staging").tempdir_in(parent)?)
}

/// Replaces `dest` with the contents of `staged`.
pub fn install_dir<P: AsRef<Path>>(staged: TempDir, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    if dest.exists() {
        remove_dir_all(dest)?;
    }
    rename(staged.path(), dest)
        .with_context(|| format!("moving {} to {}", staged.path().display(), dest.display()))?;
    Ok(())
}

pub fn extract<R, P>(archive: R, path: P, format: CompressionFormat) -> Result<()>
where
    R: std::io::Read + Seek,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match format {
        CompressionFormat::Zip => {
            let mut archive = ZipArchive::new(archive)?;
            archive.extract(path)?;
        }
        CompressionFormat::Tgz => {
            let tar = GzDecoder::new(archive);
            let mut archive = Archive::new(tar);
            archive.unpack(path)?;
        }
    }
    info!(path = %path.display(), "extracted archive");
    Ok(())
}
