use candle_core::{bail, Device, Result, Tensor};

/// Positions of the non-zero entries of a `u8` mask, as a `u32` tensor.
pub fn mask_to_index(mask: &Tensor) -> Result<Tensor> {
    Tensor::from_iter(
        mask.to_vec1()?
            .into_iter()
            .enumerate()
            .filter_map(|(idx, m): (_, u8)| if m == 0 { None } else { Some(idx as u32) }),
        mask.device(),
    )
}

/// Inverse of [`mask_to_index`]: a `u8` mask of length `len` set at `indices`.
/// Fails on an index `>= len`.
pub fn index_to_mask(indices: &Tensor, len: usize) -> Result<Tensor> {
    let mut mask = vec![0u8; len];
    for idx in indices.to_vec1::<u32>()? {
        match mask.get_mut(idx as usize) {
            Some(m) => *m = 1,
            None => bail!("index {idx} out of range for a mask of length {len}"),
        }
    }
    Tensor::from_vec(mask, len, indices.device())
}

pub fn bool_mask(mask: &[bool], device: &Device) -> Result<Tensor> {
    Tensor::from_iter(mask.iter().map(|&m| m as u8), device)
}
