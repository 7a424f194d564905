mod citation_graph;
pub use citation_graph::*;

mod citeseer;
pub use citeseer::*;

mod cora;
pub use cora::*;

mod graph;
pub use graph::*;

pub mod lbc;

mod legend;
pub use legend::*;

mod planetoid;
pub use planetoid::*;

mod pubmed_diabetes;
pub use pubmed_diabetes::*;

mod spam;
pub use spam::*;

mod traits;
pub use traits::*;

mod utils;
pub use utils::*;
