use thiserror::Error;

/// Errors raised while resolving a dataset by name.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported dataset {name}")]
    Unsupported { name: String },

    #[error("failed to load dataset {dataset}: {source:#}")]
    Load {
        dataset: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DatasetError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::Unsupported { name: name.into() }
    }

    pub fn load(dataset: impl ToString, source: anyhow::Error) -> Self {
        Self::Load {
            dataset: dataset.to_string(),
            source,
        }
    }
}
