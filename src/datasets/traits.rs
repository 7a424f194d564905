use anyhow::Result;
use candle_core::Device;

use super::GraphData;

/// Anything that can be materialised as a [`GraphData`] on a device.
pub trait GraphSource {
    fn num_classes(&self) -> usize;
    fn to_graph(&self, device: &Device) -> Result<GraphData>;
}
