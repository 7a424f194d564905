use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, ensure, Result};
use regex::Regex;
use tracing::{info, warn};

use super::{download_and_extract, install_dir, staging_dir, CitationGraph, CompressionFormat};

pub const PUBMED_URL: &str =
    "https://linqs-data.soe.ucsc.edu/public/datasets/pubmed-diabetes/pubmed-diabetes.tar.gz";

pub struct PubMedDiabetes;
impl PubMedDiabetes {
    pub const NUM_FEATURES: usize = 500;
    pub const NUM_CLASSES: usize = 3;

    pub fn download<P: AsRef<Path>>(root: P) -> Result<()> {
        let raw = root.as_ref().join("raw");
        let staged = staging_dir(&raw)?;
        download_and_extract(PUBMED_URL, staged.path(), CompressionFormat::Tgz)?;
        install_dir(staged, &raw)
    }

    pub fn raw_files<P: AsRef<Path>>(root: P) -> [PathBuf; 2] {
        let data = root.as_ref().join("raw").join("pubmed-diabetes").join("data");
        [
            data.join("Pubmed-Diabetes.NODE.paper.tab"),
            data.join("Pubmed-Diabetes.DIRECTED.cites.tab"),
        ]
    }

    /// Raw labels are 1 (experimental), 2 (type 1) and 3 (type 2); class
    /// ids follow the order of [`super::pubmed_legend`].
    pub fn class_id(raw_label: &str) -> Option<u32> {
        match raw_label {
            "1" => Some(0),
            "3" => Some(1),
            "2" => Some(2),
            _ => None,
        }
    }

    pub fn parse_raw<P: AsRef<Path>>(root: P) -> Result<CitationGraph> {
        let [nodes, cites] = Self::raw_files(root);
        Self::read_tables(
            BufReader::new(File::open(nodes)?),
            BufReader::new(File::open(cites)?),
        )
    }

    pub fn read_tables<N: BufRead, E: BufRead>(nodes: N, cites: E) -> Result<CitationGraph> {
        let e = || anyhow!("exhausted iterator");

        let mut lines_iter = nodes.lines();
        let _ = lines_iter.next().ok_or_else(e)??; // header 1

        // header 2: `cat=1,2,3:label numeric:w-rat:0.0 numeric:w-common:0.0 ...`
        let header = lines_iter.next().ok_or_else(e)??;
        let regex = Regex::new(r"numeric:(.*):(.*)")?;
        let mut feature_idx = HashMap::new();
        for entry in header.split_whitespace() {
            if let Some(c) = regex.captures(entry) {
                let key = c.get(1).ok_or_else(e)?.as_str().to_owned();
                let idx = feature_idx.len();
                feature_idx.entry(key).or_insert(idx);
            }
        }
        ensure!(
            feature_idx.len() == Self::NUM_FEATURES,
            "expected {} features in header, found {}",
            Self::NUM_FEATURES,
            feature_idx.len()
        );

        let regex = Regex::new(r"([^\s=]+)=([\d.]+)")?;
        let mut index = HashMap::new();
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for buf in lines_iter {
            let line = buf?;
            let mut entries = line.split_whitespace();
            let Some(id) = entries.next() else {
                continue;
            };
            let label = entries
                .next()
                .and_then(|entry| regex.captures(entry))
                .filter(|c| c.get(1).map(|m| m.as_str()) == Some("label"))
                .and_then(|c| c.get(2))
                .ok_or_else(|| anyhow!("paper {id}: missing label"))?;
            let y = Self::class_id(label.as_str())
                .ok_or_else(|| anyhow!("paper {id}: unknown label {}", label.as_str()))?;

            let mut row = vec![0.0f32; Self::NUM_FEATURES];
            for entry in entries {
                let Some(c) = regex.captures(entry) else {
                    continue;
                };
                let (Some(key), Some(val)) = (c.get(1), c.get(2)) else {
                    continue;
                };
                // the trailing `summary=...` column is not a feature
                if let Some(&i) = feature_idx.get(key.as_str()) {
                    row[i] = val.as_str().parse::<f32>()?;
                }
            }
            index.insert(id.to_owned(), features.len() as u32);
            features.push(row);
            labels.push(y);
        }

        let regex = Regex::new(r"\d+\s+paper:(\d+)\s*\|\s*paper:(\d+)")?;
        let mut edges = Vec::new();
        let mut dropped = 0usize;
        // two header lines
        for buf in cites.lines().skip(2) {
            let line = buf?;
            if line.trim().is_empty() {
                continue;
            }
            let c = regex
                .captures(&line)
                .ok_or_else(|| anyhow!("unparsable citation {:?}", line))?;
            let (Some(u), Some(v)) = (c.get(1), c.get(2)) else {
                return Err(anyhow!("unparsable citation {:?}", line));
            };
            match (index.get(u.as_str()), index.get(v.as_str())) {
                (Some(&u), Some(&v)) => edges.push((u, v)),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, "citations reference unknown papers");
        }
        info!(
            nodes = labels.len(),
            citations = edges.len(),
            "parsed pubmed-diabetes tables"
        );
        CitationGraph::new(Self::NUM_CLASSES, features, labels, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn node_table(rows: &str) -> String {
        let header: Vec<String> = (0..PubMedDiabetes::NUM_FEATURES)
            .map(|i| format!("numeric:w-{i}:0.0"))
            .collect();
        format!(
            "NODE\tpaper\ncat=1,2,3:label\t{}\n{rows}",
            header.join("\t")
        )
    }

    const CITES: &str = "DIRECTED\tcites\nNO_FEATURES\n\
        33824\tpaper:19127292\t|\tpaper:17363749\n\
        33825\tpaper:19668377\t|\tpaper:17293876\n";

    #[test]
    fn parses_tables() -> Result<()> {
        let nodes = node_table(
            "19127292\tlabel=1\tw-0=0.5\tw-499=0.25\tsummary=w-0,w-499\n\
             17363749\tlabel=3\tw-2=0.1\tsummary=w-2\n\
             19668377\tlabel=2\tsummary=\n",
        );
        let graph = PubMedDiabetes::read_tables(Cursor::new(nodes), Cursor::new(CITES))?;
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_features(), PubMedDiabetes::NUM_FEATURES);
        assert_eq!(graph.labels, vec![0, 1, 2]);
        assert_eq!(graph.features[0][0], 0.5);
        assert_eq!(graph.features[0][499], 0.25);
        assert_eq!(graph.features[1][2], 0.1);
        // the second citation points at a paper that is not in the node table
        assert_eq!(graph.edges, vec![(0, 1), (1, 0)]);
        Ok(())
    }

    #[test]
    fn rejects_short_header() {
        let nodes = "NODE\tpaper\ncat=1,2,3:label\tnumeric:w-rat:0.0\n";
        let err = PubMedDiabetes::read_tables(Cursor::new(nodes), Cursor::new(CITES)).unwrap_err();
        assert!(err.to_string().contains("expected 500 features"));
    }

    #[rstest]
    #[case("1", Some(0))]
    #[case("2", Some(2))]
    #[case("3", Some(1))]
    #[case("4", None)]
    fn label_mapping(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(PubMedDiabetes::class_id(raw), expected);
    }
}
