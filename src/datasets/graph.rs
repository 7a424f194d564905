use candle_core::{Result, Tensor};

use crate::utils::mask_to_index;

/// A single node-classification graph.
///
/// Masks are `u8` tensors of length `num_nodes`; use
/// [`GraphData::train_indices`] and friends to get index lists.
#[derive(Debug, Clone)]
pub struct GraphData {
    pub x: Tensor,
    pub edge_index: Tensor,
    pub edge_attr: Option<Tensor>,
    pub y: Tensor,
    pub train_mask: Tensor,
    pub val_mask: Tensor,
    pub test_mask: Tensor,
}
impl GraphData {
    pub fn num_nodes(&self) -> usize {
        self.y.dims().first().copied().unwrap_or(0)
    }
    pub fn num_edges(&self) -> usize {
        self.edge_index.dims().get(1).copied().unwrap_or(0)
    }
    pub fn num_features(&self) -> usize {
        self.x.dims().get(1).copied().unwrap_or(0)
    }
    pub fn train_indices(&self) -> Result<Tensor> {
        mask_to_index(&self.train_mask)
    }
    pub fn val_indices(&self) -> Result<Tensor> {
        mask_to_index(&self.val_mask)
    }
    pub fn test_indices(&self) -> Result<Tensor> {
        mask_to_index(&self.test_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::bool_mask;
    use candle_core::Device;

    #[test]
    fn counts_and_indices() -> Result<()> {
        let device = Device::Cpu;
        let graph = GraphData {
            x: Tensor::zeros((4, 3), candle_core::DType::F32, &device)?,
            edge_index: Tensor::new(&[[0u32, 1, 2], [1, 2, 3]], &device)?,
            edge_attr: None,
            y: Tensor::new(&[0u32, 1, 0, 1], &device)?,
            train_mask: bool_mask(&[true, true, false, false], &device)?,
            val_mask: bool_mask(&[false, false, true, false], &device)?,
            test_mask: bool_mask(&[false, false, false, true], &device)?,
        };
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.num_features(), 3);
        assert_eq!(graph.train_indices()?.to_vec1::<u32>()?, vec![0, 1]);
        assert_eq!(graph.val_indices()?.to_vec1::<u32>()?, vec![2]);
        assert_eq!(graph.test_indices()?.to_vec1::<u32>()?, vec![3]);
        Ok(())
    }
}
