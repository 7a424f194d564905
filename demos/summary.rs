use candle_core::Device;
use tracing_subscriber::EnvFilter;

use candle_dgm_datasets::{DatasetLoader, LoaderConfig};

// cargo run --example summary -- spam
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "spam".to_owned());
    let loader = DatasetLoader::new(
        LoaderConfig {
            seed: Some(0),
            ..Default::default()
        },
        Device::Cpu,
    );
    let (graph, num_classes, legend) = loader.load(&name)?;

    println!(
        "{name}: {} nodes, {} edges, {} features, {num_classes} classes",
        graph.num_nodes(),
        graph.num_edges(),
        graph.num_features(),
    );
    println!(
        "train {} / val {} / test {}",
        graph.train_indices()?.dim(0)?,
        graph.val_indices()?.dim(0)?,
        graph.test_indices()?.dim(0)?,
    );
    let counts = graph.y.to_vec1::<u32>()?;
    for (id, label) in &legend {
        let count = counts.iter().filter(|&&y| y == *id).count();
        println!("{id:3} {label:<35} {count:6}");
    }
    Ok(())
}
