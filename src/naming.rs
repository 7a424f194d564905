//! Run names for experiment logs and artifacts.

use itertools::Itertools;

/// The configuration fields a run name is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dataset: String,
    pub sdgm: bool,
    pub train_mode: String,
    pub lens: String,
    pub reduce_method: String,
}
impl RunConfig {
    fn model(&self) -> &'static str {
        if self.sdgm {
            "sdgm"
        } else {
            "dgm"
        }
    }
}

fn run_name(args: &RunConfig, method: &str, labeled: bool) -> String {
    [
        args.dataset.as_str(),
        args.model(),
        args.train_mode.as_str(),
        method,
        if labeled { "labeled" } else { "pred" },
    ]
    .iter()
    .join("_")
}

/// `{dataset}_{sdgm|dgm}_{train_mode}_{lens}_{labeled|pred}`
pub fn gtl_name_from_args(args: &RunConfig, labeled: bool) -> String {
    run_name(args, &args.lens, labeled)
}

/// `{dataset}_{sdgm|dgm}_{train_mode}_{reduce_method}_{labeled|pred}`
pub fn dgm_name_from_args(args: &RunConfig, labeled: bool) -> String {
    run_name(args, &args.reduce_method, labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn args() -> RunConfig {
        RunConfig {
            dataset: "cora".to_owned(),
            sdgm: true,
            train_mode: "joint".to_owned(),
            lens: "pca".to_owned(),
            reduce_method: "mean".to_owned(),
        }
    }

    #[rstest]
    fn labeled_names(args: RunConfig) {
        assert_eq!(gtl_name_from_args(&args, true), "cora_sdgm_joint_pca_labeled");
        assert_eq!(dgm_name_from_args(&args, true), "cora_sdgm_joint_mean_labeled");
    }

    #[rstest]
    fn predicted_dgm_names(mut args: RunConfig) {
        args.sdgm = false;
        assert_eq!(gtl_name_from_args(&args, false), "cora_dgm_joint_pca_pred");
        assert_eq!(dgm_name_from_args(&args, false), "cora_dgm_joint_mean_pred");
    }

    #[rstest]
    fn values_are_used_verbatim(mut args: RunConfig) {
        args.dataset = "my data".to_owned();
        args.lens = String::new();
        assert_eq!(gtl_name_from_args(&args, true), "my data_sdgm_joint__labeled");
    }
}
