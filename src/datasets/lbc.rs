//! Reader for the LINQS "lbc" citation format shared by Cora and CiteSeer.
//!
//! `.content` rows are `<paper id> <f_1> .. <f_F> <class label>` and
//! `.cites` rows are `<cited paper id> <citing paper id>`.

use std::{collections::HashMap, io::BufRead};

use anyhow::{anyhow, ensure, Context, Result};
use tracing::{info, warn};

use super::{label_id, CitationGraph, Legend};

pub fn read_content_cites<C, E>(
    content: C,
    cites: E,
    num_features: usize,
    legend: &Legend,
) -> Result<CitationGraph>
where
    C: BufRead,
    E: BufRead,
{
    let mut index = HashMap::new();
    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (lineno, buf) in content.lines().enumerate() {
        let line = buf?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let (id, rest) = fields.split_first().ok_or_else(|| anyhow!("empty row"))?;
        let (label, xs) = rest
            .split_last()
            .ok_or_else(|| anyhow!("content line {}: missing label", lineno + 1))?;
        ensure!(
            xs.len() == num_features,
            "content line {}: expected {} features, found {}",
            lineno + 1,
            num_features,
            xs.len()
        );
        let row = xs
            .iter()
            .map(|x| x.parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("content line {}", lineno + 1))?;
        let y = label_id(legend, label)
            .ok_or_else(|| anyhow!("content line {}: unknown label {:?}", lineno + 1, label))?;
        if index.contains_key(*id) {
            warn!(id = *id, line = lineno + 1, "duplicate paper id; skipping the row");
            continue;
        }
        index.insert(id.to_string(), features.len() as u32);
        features.push(row);
        labels.push(y);
    }

    let mut edges = Vec::new();
    let mut dropped = 0usize;
    for (lineno, buf) in cites.lines().enumerate() {
        let line = buf?;
        let mut iter = line.split_whitespace();
        let (Some(cited), Some(citing)) = (iter.next(), iter.next()) else {
            if line.trim().is_empty() {
                continue;
            }
            return Err(anyhow!("cites line {}: expected two ids", lineno + 1));
        };
        ensure!(
            iter.next().is_none(),
            "cites line {}: trailing fields",
            lineno + 1
        );
        match (index.get(citing), index.get(cited)) {
            (Some(&u), Some(&v)) => edges.push((u, v)),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, "citations reference papers without content rows");
    }
    info!(
        nodes = labels.len(),
        citations = edges.len(),
        "parsed lbc citation graph"
    );
    CitationGraph::new(legend.len(), features, labels, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{citeseer_legend, cora_legend};
    use std::io::Cursor;

    const CONTENT: &str = "\
31336 0 1 0 Neural_Networks
1061127 1 0 0 Rule_Learning
1106406 0 0 1 Reinforcement_Learning
";

    const CITES: &str = "\
31336 1061127
1106406 31336
999 31336
";

    #[test]
    fn parses_cora_rows() -> Result<()> {
        let graph = read_content_cites(
            Cursor::new(CONTENT),
            Cursor::new(CITES),
            3,
            &cora_legend(),
        )?;
        assert_eq!(graph.num_classes, 7);
        assert_eq!(graph.labels, vec![3, 6, 1]);
        assert_eq!(graph.features[1], vec![1.0, 0.0, 0.0]);
        // 1061127 cites 31336, 31336 cites 1106406; the citation of 999 is dropped
        assert_eq!(graph.edges, vec![(0, 1), (0, 2), (1, 0), (2, 0)]);
        Ok(())
    }

    #[test]
    fn string_ids_and_citeseer_labels() -> Result<()> {
        let content = "ricci98a 1 0 Agents\nbrin98 0 1 IR\n";
        let cites = "ricci98a brin98\n\n";
        let graph = read_content_cites(
            Cursor::new(content),
            Cursor::new(cites),
            2,
            &citeseer_legend(),
        )?;
        assert_eq!(graph.labels, vec![4, 2]);
        assert_eq!(graph.edges, vec![(0, 1), (1, 0)]);
        Ok(())
    }

    #[test]
    fn duplicate_ids_keep_the_first_row() -> Result<()> {
        let content = "a 1 0 AI\nb 0 1 IR\na 1 1 ML\n";
        let cites = "a b\n";
        let graph = read_content_cites(
            Cursor::new(content),
            Cursor::new(cites),
            2,
            &citeseer_legend(),
        )?;
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.labels, vec![0, 2]);
        assert_eq!(graph.features[0], vec![1.0, 0.0]);
        assert_eq!(graph.edges, vec![(0, 1), (1, 0)]);
        Ok(())
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let err = read_content_cites(
            Cursor::new(CONTENT),
            Cursor::new(CITES),
            4,
            &cora_legend(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected 4 features"));
    }

    #[test]
    fn rejects_unknown_label() {
        let err = read_content_cites(
            Cursor::new("1 0 Astrology\n"),
            Cursor::new(""),
            1,
            &cora_legend(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown label"));
    }
}
