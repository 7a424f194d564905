//! Datasets for DGM graph experiments: the Planetoid citation networks,
//! a synthetic spam network, class legends and run names.

pub mod datasets;
pub mod error;
pub mod loader;
pub mod naming;
pub mod utils;

pub use error::DatasetError;
pub use loader::{load_dataset, DatasetKind, DatasetLoader, LoaderConfig};
pub use naming::{dgm_name_from_args, gtl_name_from_args, RunConfig};
