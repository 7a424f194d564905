use std::path::PathBuf;

use candle_core::Device;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::datasets::{
    generate_spam_graph_with, spam_legend, Citation, GraphData, GraphSource, Legend, Planetoid,
    SpamConfig, SplitMode,
};
use crate::error::DatasetError;

/// A dataset name resolved once up front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DatasetKind {
    Cora,
    CiteSeer,
    PubMed,
    Spam,
    Unsupported(String),
}
impl DatasetKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "cora" => Self::Cora,
            "citeseer" => Self::CiteSeer,
            "pubmed" => Self::PubMed,
            "spam" => Self::Spam,
            other => Self::Unsupported(other.to_owned()),
        }
    }
}
impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Cora => write!(f, "cora"),
            Self::CiteSeer => write!(f, "citeseer"),
            Self::PubMed => write!(f, "pubmed"),
            Self::Spam => write!(f, "spam"),
            Self::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Citation datasets live in `{root}/Cora`, `{root}/CiteSeer`, `{root}/PubMed`.
    pub root: PathBuf,
    pub spam_nodes: usize,
    /// Seeds the spam generator; `None` draws a seed from the OS.
    pub seed: Option<u64>,
    pub split_mode: SplitMode,
}
impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/tmp"),
            spam_nodes: SpamConfig::default().node_count,
            seed: None,
            split_mode: SplitMode::default(),
        }
    }
}

pub struct DatasetLoader {
    config: LoaderConfig,
    device: Device,
}
impl DatasetLoader {
    pub fn new(config: LoaderConfig, device: Device) -> Self {
        Self { config, device }
    }
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the graph, its class count and its legend.
    pub fn load(&self, name: &str) -> Result<(GraphData, usize, Legend), DatasetError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.load_with_rng(name, &mut rng)
    }

    /// Like [`DatasetLoader::load`], drawing the spam graph from `rng`.
    pub fn load_with_rng<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<(GraphData, usize, Legend), DatasetError> {
        let kind = DatasetKind::parse(name);
        let (source, legend): (Box<dyn GraphSource>, Legend) = match &kind {
            DatasetKind::Cora => self.citation(Citation::Cora),
            DatasetKind::CiteSeer => self.citation(Citation::CiteSeer),
            DatasetKind::PubMed => self.citation(Citation::PubMed),
            DatasetKind::Spam => {
                let config = SpamConfig {
                    node_count: self.config.spam_nodes,
                    split_mode: self.config.split_mode,
                };
                let spam: Box<dyn GraphSource> = Box::new(generate_spam_graph_with(config, rng));
                (spam, spam_legend())
            }
            DatasetKind::Unsupported(name) => return Err(DatasetError::unsupported(name.as_str())),
        };
        let graph = source
            .to_graph(&self.device)
            .map_err(|e| DatasetError::load(&kind, e))?;
        let num_classes = source.num_classes();
        info!(
            dataset = %kind,
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            num_classes,
            "loaded dataset"
        );
        Ok((graph, num_classes, legend))
    }

    fn citation(&self, name: Citation) -> (Box<dyn GraphSource>, Legend) {
        let source: Box<dyn GraphSource> = Box::new(Planetoid::new(&self.config.root, name));
        (source, name.legend())
    }
}

/// Loads `name` with the default configuration on the CPU.
pub fn load_dataset(name: &str) -> Result<(GraphData, usize, Legend), DatasetError> {
    DatasetLoader::new(LoaderConfig::default(), Device::Cpu).load(name)
}
