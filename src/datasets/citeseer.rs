use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use ::zip::ZipArchive;
use anyhow::Result;

use super::{citeseer_legend, install_dir, lbc, staging_dir, utils::RemoteFile, CitationGraph};

pub const CITESEER_URL: &str = "https://linqs-data.soe.ucsc.edu/public/lbc/citeseer.zip";

pub struct CiteSeer;
impl CiteSeer {
    pub const NUM_FEATURES: usize = 3703;
    pub const NUM_CLASSES: usize = 6;

    /// Downloads the archive and keeps only the `.content` and `.cites`
    /// files under `root/raw`, which is replaced only once both are written.
    pub fn download<P: AsRef<Path>>(root: P) -> Result<()> {
        let mut local_file = tempfile::tempfile()?;
        let mut remote_file = RemoteFile::with_pbar(CITESEER_URL)?;
        std::io::copy(&mut remote_file, &mut local_file)?;

        let raw = root.as_ref().join("raw");
        let staged = staging_dir(&raw)?;
        let mut archive = ZipArchive::new(local_file)?;
        for (name, filename) in [
            ("citeseer/citeseer.content", "citeseer.content"),
            ("citeseer/citeseer.cites", "citeseer.cites"),
        ] {
            std::io::copy(
                &mut archive.by_name(name)?,
                &mut File::create(staged.path().join(filename))?,
            )?;
        }
        install_dir(staged, &raw)
    }

    /// `raw/citeseer.content` and `raw/citeseer.cites` under `root`.
    pub fn raw_files<P: AsRef<Path>>(root: P) -> [PathBuf; 2] {
        let raw = root.as_ref().join("raw");
        [raw.join("citeseer.content"), raw.join("citeseer.cites")]
    }

    pub fn parse_raw<P: AsRef<Path>>(root: P) -> Result<CitationGraph> {
        let [content, cites] = Self::raw_files(root);
        lbc::read_content_cites(
            BufReader::new(File::open(content)?),
            BufReader::new(File::open(cites)?),
            Self::NUM_FEATURES,
            &citeseer_legend(),
        )
    }
}
