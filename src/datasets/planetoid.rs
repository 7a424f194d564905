use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use candle_core::{DType, Device, Tensor};
use tracing::info;

use super::{
    citeseer_legend, cora_legend, pubmed_legend, CitationGraph, CiteSeer, Cora, GraphData,
    GraphSource, Legend, PubMedDiabetes,
};
use crate::utils::index_to_mask;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Citation {
    Cora,
    CiteSeer,
    PubMed,
}
impl Citation {
    /// Directory name under the dataset root, e.g. `/tmp/Cora`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Cora => "Cora",
            Self::CiteSeer => "CiteSeer",
            Self::PubMed => "PubMed",
        }
    }
    pub fn num_classes(&self) -> usize {
        match self {
            Self::Cora => Cora::NUM_CLASSES,
            Self::CiteSeer => CiteSeer::NUM_CLASSES,
            Self::PubMed => PubMedDiabetes::NUM_CLASSES,
        }
    }
    pub fn legend(&self) -> Legend {
        match self {
            Self::Cora => cora_legend(),
            Self::CiteSeer => citeseer_legend(),
            Self::PubMed => pubmed_legend(),
        }
    }
    fn download(&self, dir: &Path) -> Result<()> {
        match self {
            Self::Cora => Cora::download(dir),
            Self::CiteSeer => CiteSeer::download(dir),
            Self::PubMed => PubMedDiabetes::download(dir),
        }
    }
    /// The files [`Planetoid::prepare_data`] parses, under the dataset dir.
    pub fn raw_files(&self, dir: &Path) -> [PathBuf; 2] {
        match self {
            Self::Cora => Cora::raw_files(dir),
            Self::CiteSeer => CiteSeer::raw_files(dir),
            Self::PubMed => PubMedDiabetes::raw_files(dir),
        }
    }
    fn parse_raw(&self, dir: &Path) -> Result<CitationGraph> {
        match self {
            Self::Cora => Cora::parse_raw(dir),
            Self::CiteSeer => CiteSeer::parse_raw(dir),
            Self::PubMed => PubMedDiabetes::parse_raw(dir),
        }
    }
}
impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Cora => write!(f, "cora"),
            Self::CiteSeer => write!(f, "citeseer"),
            Self::PubMed => write!(f, "pubmed"),
        }
    }
}

// An export of a torch_geometric Planetoid dataset, read before anything
// is downloaded:
//
// ```python
// dataset = Planetoid(root='data/Planetoid', name='Cora')
// data = {
//     "x": dataset.x.numpy(),
//     "edge_index": dataset.edge_index.numpy(),
//     "y": dataset.y.numpy(),
//     "train_indices": np.where(dataset.train_mask)[0],
//     "val_indices": np.where(dataset.val_mask)[0],
//     "test_indices": np.where(dataset.test_mask)[0],
// }
// with open("cora.npz", "wb") as f:
//     np.savez(f, **data)
// ```
pub struct PlanetoidExport {
    pub x: Tensor,
    pub edge_index: Tensor,
    pub y: Tensor,
    pub train_indices: Tensor,
    pub val_indices: Tensor,
    pub test_indices: Tensor,
}
impl PlanetoidExport {
    pub fn from_file<P: AsRef<Path>>(npz: P, device: &Device) -> Result<Self> {
        let npz = npz.as_ref();
        let mut hashmap: HashMap<String, Tensor> = HashMap::from_iter(Tensor::read_npz(npz)?);
        let mut take = |key: &str, dtype: DType| -> Result<Tensor> {
            let tensor = hashmap
                .remove(key)
                .ok_or_else(|| anyhow!("{} has no array {:?}", npz.display(), key))?;
            Ok(tensor.to_dtype(dtype)?.to_device(device)?)
        };
        Ok(Self {
            x: take("x", DType::F32)?,
            edge_index: take("edge_index", DType::U32)?,
            y: take("y", DType::U32)?,
            train_indices: take("train_indices", DType::U32)?,
            val_indices: take("val_indices", DType::U32)?,
            test_indices: take("test_indices", DType::U32)?,
        })
    }

    pub fn into_graph(self) -> Result<GraphData> {
        let n = self.y.dim(0)?;
        Ok(GraphData {
            train_mask: index_to_mask(&self.train_indices, n)?,
            val_mask: index_to_mask(&self.val_indices, n)?,
            test_mask: index_to_mask(&self.test_indices, n)?,
            x: self.x,
            edge_index: self.edge_index,
            edge_attr: None,
            y: self.y,
        })
    }
}

/// A citation dataset rooted at `{root}/{Cora,CiteSeer,PubMed}`.
///
/// Loading prefers `{dir}/{name}.npz`, then the parquet cache in
/// `{dir}/processed`, and finally downloads and parses the raw files,
/// filling the cache on the way.
#[derive(Debug, Clone)]
pub struct Planetoid {
    name: Citation,
    dir: PathBuf,
}
impl Planetoid {
    pub fn new<P: AsRef<Path>>(root: P, name: Citation) -> Self {
        Self {
            name,
            dir: root.as_ref().join(name.dir_name()),
        }
    }
    pub fn name(&self) -> Citation {
        self.name
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    pub fn npz_path(&self) -> PathBuf {
        self.dir.join(format!("{}.npz", self.name))
    }
    fn processed(&self) -> PathBuf {
        self.dir.join("processed")
    }
    /// Whether every raw file is in place; a bare or partial `raw/` does not count.
    pub fn has_raw_files(&self) -> bool {
        self.name.raw_files(&self.dir).iter().all(|path| path.is_file())
    }

    pub fn prepare_data(&self) -> Result<CitationGraph> {
        let processed = self.processed();
        if processed.join("nodes.parquet").exists() && processed.join("edges.parquet").exists() {
            return CitationGraph::read_parquet(&processed, self.name.num_classes());
        }
        if !self.has_raw_files() {
            self.name.download(&self.dir)?;
        }
        info!(dataset = %self.name, dir = %self.dir.display(), "processing raw files");
        let graph = self.name.parse_raw(&self.dir)?;
        graph.write_parquet(&processed)?;
        Ok(graph)
    }
}

impl GraphSource for Planetoid {
    fn num_classes(&self) -> usize {
        self.name.num_classes()
    }
    fn to_graph(&self, device: &Device) -> Result<GraphData> {
        let npz = self.npz_path();
        if npz.exists() {
            info!(path = %npz.display(), "loading planetoid export");
            return PlanetoidExport::from_file(&npz, device)?.into_graph();
        }
        self.prepare_data()
            .and_then(|graph| graph.to_graph(device))
            .with_context(|| format!("preparing {} under {}", self.name, self.dir.display()))
    }
}
