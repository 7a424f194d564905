//! Synthetic "spam network" graph.
//!
//! Spammers get many neighbours (up to a fifth of the graph), a node
//! feature in the upper half of `[0, 1)` and edge "trust" values in the
//! upper third. Non-spammers get 1 to 10 neighbours and unbiased values.
//! Everything is drawn from the caller's RNG, so a seeded RNG reproduces
//! the graph exactly.

use anyhow::Result;
use candle_core::{Device, Tensor};
use rand::Rng;
use tracing::{debug, info, warn};

use super::{GraphData, GraphSource};
use crate::utils::bool_mask;

pub const SPAM_NUM_CLASSES: usize = 2;

/// How the positional train/test masks are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Train is the first `floor(0.8 n)` nodes and test the last
    /// `floor(0.2 n)`, except that an empty tail selects every node.
    /// For `n < 5` the two masks overlap.
    #[default]
    Literal,
    /// Test is exactly `[n - floor(0.2 n), n)`; never overlaps train.
    Disjoint,
}

#[derive(Debug, Clone, Copy)]
pub struct SpamConfig {
    pub node_count: usize,
    pub split_mode: SplitMode,
}
impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            node_count: 1000,
            split_mode: SplitMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpamGraph {
    pub node_features: Vec<f32>,
    pub edges: Vec<(u32, u32)>,
    pub edge_features: Vec<f32>,
    pub labels: Vec<u32>,
    pub train_mask: Vec<bool>,
    pub test_mask: Vec<bool>,
}
impl SpamGraph {
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    pub fn masks_overlap(&self) -> bool {
        self.train_mask
            .iter()
            .zip(&self.test_mask)
            .any(|(&train, &test)| train && test)
    }
}

/// Generates a spam graph with the default literal split.
pub fn generate_spam_graph<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> SpamGraph {
    generate_spam_graph_with(
        SpamConfig {
            node_count,
            ..Default::default()
        },
        rng,
    )
}

pub fn generate_spam_graph_with<R: Rng + ?Sized>(config: SpamConfig, rng: &mut R) -> SpamGraph {
    let n = config.node_count;
    let mut node_features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    let mut edges = Vec::new();
    let mut edge_features = Vec::new();

    for node in 0..n {
        let (num_neighbors, node_feature, edge_feature, label) = if rng.gen::<f64>() > 0.5 {
            let num_neighbors = (rng.gen::<f64>() * (n as f64 / 5.0)) as usize;
            let node_feature = (rng.gen::<f64>() + 1.0) / 2.0;
            let edge_feature = (rng.gen::<f64>() + 2.0) / 3.0;
            (num_neighbors, node_feature, edge_feature, 1)
        } else {
            let num_neighbors = (rng.gen::<f64>() * 10.0 + 1.0) as usize;
            let node_feature = rng.gen::<f64>();
            let edge_feature = rng.gen::<f64>();
            (num_neighbors, node_feature, edge_feature, 0)
        };
        node_features.push(node_feature as f32);
        labels.push(label);
        edge_features.extend(std::iter::repeat(edge_feature as f32).take(num_neighbors));
        edges.extend((0..num_neighbors).map(|_| (node as u32, rng.gen_range(0..n) as u32)));
        debug!(node, label, num_neighbors, "spam node");
    }

    let (train_mask, test_mask) = split_masks(n, config.split_mode);
    let graph = SpamGraph {
        node_features,
        edges,
        edge_features,
        labels,
        train_mask,
        test_mask,
    };
    info!(
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        spammers = graph.labels.iter().filter(|&&y| y == 1).count(),
        "generated spam graph"
    );
    if graph.masks_overlap() {
        warn!(
            nodes = n,
            "spam train and test masks overlap; use SplitMode::Disjoint for a clean split"
        );
    }
    graph
}

/// Positional train/test masks for `n` nodes.
pub fn split_masks(n: usize, mode: SplitMode) -> (Vec<bool>, Vec<bool>) {
    let num_train = (0.8 * n as f64) as usize;
    let num_test = (0.2 * n as f64) as usize;
    let test_start = match mode {
        // `mask[-0:]` covers the whole range
        SplitMode::Literal if num_test == 0 => 0,
        SplitMode::Literal | SplitMode::Disjoint => n - num_test,
    };
    let train_mask = (0..n).map(|i| i < num_train).collect();
    let test_mask = (0..n).map(|i| i >= test_start).collect();
    (train_mask, test_mask)
}

impl GraphSource for SpamGraph {
    fn num_classes(&self) -> usize {
        SPAM_NUM_CLASSES
    }
    fn to_graph(&self, device: &Device) -> Result<GraphData> {
        let n = self.num_nodes();
        let x = Tensor::from_vec(self.node_features.clone(), (n, 1), device)?;
        let (source, target): (Vec<u32>, Vec<u32>) = self.edges.iter().copied().unzip();
        let num_edges = source.len();
        let edge_index = Tensor::stack(
            &[
                Tensor::from_vec(source, num_edges, device)?,
                Tensor::from_vec(target, num_edges, device)?,
            ],
            0,
        )?;
        let edge_attr = Tensor::from_vec(self.edge_features.clone(), num_edges, device)?;
        Ok(GraphData {
            x,
            edge_index,
            edge_attr: Some(edge_attr),
            y: Tensor::from_vec(self.labels.clone(), n, device)?,
            train_mask: bool_mask(&self.train_mask, device)?,
            val_mask: bool_mask(&vec![false; n], device)?,
            test_mask: bool_mask(&self.test_mask, device)?,
        })
    }
}
