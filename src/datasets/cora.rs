use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Result;

use super::{
    cora_legend, download_and_extract, install_dir, lbc, staging_dir, CitationGraph,
    CompressionFormat,
};

pub const CORA_URL: &str = "https://linqs-data.soe.ucsc.edu/public/lbc/cora.tgz";

pub struct Cora;
impl Cora {
    pub const NUM_FEATURES: usize = 1433;
    pub const NUM_CLASSES: usize = 7;

    /// Extracts the archive into a staging directory and moves it to
    /// `root/raw` once complete.
    pub fn download<P: AsRef<Path>>(root: P) -> Result<()> {
        let raw = root.as_ref().join("raw");
        let staged = staging_dir(&raw)?;
        download_and_extract(CORA_URL, staged.path(), CompressionFormat::Tgz)?;
        install_dir(staged, &raw)
    }

    /// `raw/cora/cora.content` and `raw/cora/cora.cites` under `root`.
    pub fn raw_files<P: AsRef<Path>>(root: P) -> [PathBuf; 2] {
        let dir = root.as_ref().join("raw").join("cora");
        [dir.join("cora.content"), dir.join("cora.cites")]
    }

    pub fn parse_raw<P: AsRef<Path>>(root: P) -> Result<CitationGraph> {
        let [content, cites] = Self::raw_files(root);
        lbc::read_content_cites(
            BufReader::new(File::open(content)?),
            BufReader::new(File::open(cites)?),
            Self::NUM_FEATURES,
            &cora_legend(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_extracted_layout() -> Result<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("raw").join("cora");
        fs::create_dir_all(&dir)?;
        let zeros = vec!["0"; Cora::NUM_FEATURES].join(" ");
        fs::write(
            dir.join("cora.content"),
            format!("35 {zeros} Theory\n40 {zeros} Case_Based\n"),
        )?;
        fs::write(dir.join("cora.cites"), "35 40\n")?;

        let graph = Cora::parse_raw(root.path())?;
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_features(), Cora::NUM_FEATURES);
        assert_eq!(graph.labels, vec![0, 5]);
        assert_eq!(graph.edges.len(), 2);
        Ok(())
    }
}
