use std::{fs::File, path::Path};

use anyhow::{ensure, Context, Result};
use candle_core::{Device, Tensor};
use polars::io::{
    parquet::{ParquetReader, ParquetWriter},
    SerReader,
};
use polars::prelude::{df, DataFrame, DataType, NamedFrom, NamedFromOwned, Series};
use tracing::info;

use super::{GraphData, GraphSource};
use crate::utils::bool_mask;

pub const TRAIN_PER_CLASS: usize = 20;
pub const NUM_VAL: usize = 500;
pub const NUM_TEST: usize = 1000;

/// A citation network parsed from raw LINQS files, held in host memory.
///
/// Edges are undirected: both directions are present, sorted and
/// deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationGraph {
    pub num_classes: usize,
    pub features: Vec<Vec<f32>>,
    pub labels: Vec<u32>,
    pub edges: Vec<(u32, u32)>,
}
impl CitationGraph {
    pub fn new(
        num_classes: usize,
        features: Vec<Vec<f32>>,
        labels: Vec<u32>,
        directed_edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self> {
        ensure!(
            features.len() == labels.len(),
            "{} feature rows for {} labels",
            features.len(),
            labels.len()
        );
        if let Some(first) = features.first() {
            ensure!(
                features.iter().all(|row| row.len() == first.len()),
                "feature rows have different lengths"
            );
        }
        ensure!(
            labels.iter().all(|&y| (y as usize) < num_classes),
            "label out of range for {num_classes} classes"
        );
        let n = labels.len();
        let mut edges: Vec<(u32, u32)> = directed_edges
            .into_iter()
            .flat_map(|(u, v)| [(u, v), (v, u)])
            .collect();
        ensure!(
            edges.iter().all(|&(u, _)| (u as usize) < n),
            "edge endpoint out of range for {n} nodes"
        );
        edges.sort_unstable();
        edges.dedup();
        Ok(Self {
            num_classes,
            features,
            labels,
            edges,
        })
    }
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }
    pub fn num_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// The first [`TRAIN_PER_CLASS`] nodes of every class (in file order)
    /// train; of the rest, the next [`NUM_VAL`] validate and the next
    /// [`NUM_TEST`] test.
    pub fn split_masks(&self) -> (Vec<bool>, Vec<bool>, Vec<bool>) {
        let n = self.num_nodes();
        let mut train = vec![false; n];
        let mut val = vec![false; n];
        let mut test = vec![false; n];
        let mut per_class = vec![0usize; self.num_classes];
        for (node, &y) in self.labels.iter().enumerate() {
            if let Some(count) = per_class.get_mut(y as usize) {
                if *count < TRAIN_PER_CLASS {
                    *count += 1;
                    train[node] = true;
                }
            }
        }
        let mut rest = (0..n).filter(|&node| !train[node]);
        for node in rest.by_ref().take(NUM_VAL) {
            val[node] = true;
        }
        for node in rest.take(NUM_TEST) {
            test[node] = true;
        }
        (train, val, test)
    }

    /// Writes `nodes.parquet` (`label`, `xs.{i}`) and `edges.parquet`
    /// (`source`, `target`) into `dir`.
    pub fn write_parquet<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut columns = vec![Series::from_vec("label", self.labels.clone())];
        for i in 0..self.num_features() {
            let column: Vec<f32> = self.features.iter().map(|row| row[i]).collect();
            columns.push(Series::from_vec(&feature_col(i), column));
        }
        let mut node_df = DataFrame::new(columns)?;
        ParquetWriter::new(File::create(dir.join("nodes.parquet"))?).finish(&mut node_df)?;

        let (source, target): (Vec<u32>, Vec<u32>) = self.edges.iter().copied().unzip();
        let mut edge_df = df! {
            "source" => source,
            "target" => target,
        }?;
        ParquetWriter::new(File::create(dir.join("edges.parquet"))?).finish(&mut edge_df)?;
        info!(path = %dir.display(), "wrote processed citation graph");
        Ok(())
    }

    /// Reads a cache written by [`CitationGraph::write_parquet`], checking it
    /// the same way [`CitationGraph::new`] checks freshly parsed files.
    pub fn read_parquet<P: AsRef<Path>>(dir: P, num_classes: usize) -> Result<Self> {
        let dir = dir.as_ref();
        let node_df = ParquetReader::new(File::open(dir.join("nodes.parquet"))?).finish()?;
        let edge_df = ParquetReader::new(File::open(dir.join("edges.parquet"))?).finish()?;

        let labels = u32_column(&node_df, "label")?;
        let num_features = node_df.width().saturating_sub(1);
        let mut features = vec![Vec::with_capacity(num_features); node_df.height()];
        for i in 0..num_features {
            let column = node_df.column(&feature_col(i))?.cast(&DataType::Float32)?;
            for (row, x) in features.iter_mut().zip(column.f32()?.into_no_null_iter()) {
                row.push(x);
            }
        }
        let edges: Vec<(u32, u32)> = u32_column(&edge_df, "source")?
            .into_iter()
            .zip(u32_column(&edge_df, "target")?)
            .collect();
        let graph = Self::new(num_classes, features, labels, edges)
            .with_context(|| format!("invalid citation cache in {}", dir.display()))?;
        info!(
            path = %dir.display(),
            nodes = graph.num_nodes(),
            features = num_features,
            "loaded processed citation graph"
        );
        Ok(graph)
    }
}

fn feature_col(i: usize) -> String {
    format!("xs.{}", i)
}

fn u32_column(df: &DataFrame, name: &str) -> Result<Vec<u32>> {
    let column = df.column(name)?.cast(&DataType::UInt32)?;
    let values = column.u32()?.into_no_null_iter().collect();
    Ok(values)
}

impl GraphSource for CitationGraph {
    fn num_classes(&self) -> usize {
        self.num_classes
    }
    fn to_graph(&self, device: &Device) -> Result<GraphData> {
        let n = self.num_nodes();
        let x = Tensor::from_vec(
            self.features.concat(),
            (n, self.num_features()),
            device,
        )?;
        let (source, target): (Vec<u32>, Vec<u32>) = self.edges.iter().copied().unzip();
        let num_edges = source.len();
        let edge_index = Tensor::stack(
            &[
                Tensor::from_vec(source, num_edges, device)?,
                Tensor::from_vec(target, num_edges, device)?,
            ],
            0,
        )?;
        let (train, val, test) = self.split_masks();
        Ok(GraphData {
            x,
            edge_index,
            edge_attr: None,
            y: Tensor::from_vec(self.labels.clone(), n, device)?,
            train_mask: bool_mask(&train, device)?,
            val_mask: bool_mask(&val, device)?,
            test_mask: bool_mask(&test, device)?,
        })
    }
}
