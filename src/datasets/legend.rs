use std::collections::BTreeMap;

/// Class id to display name.
pub type Legend = BTreeMap<u32, &'static str>;

fn legend<const N: usize>(names: [&'static str; N]) -> Legend {
    (0u32..).zip(names).collect()
}

pub fn cora_legend() -> Legend {
    legend([
        "Theory",
        "Reinforcement Learning",
        "Genetic Algorithms",
        "Neural Networks",
        "Probabilistic Methods",
        "Case Based",
        "Rule Learning",
    ])
}

pub fn citeseer_legend() -> Legend {
    legend(["AI", "ML", "IR", "DB", "Agents", "HCI"])
}

pub fn pubmed_legend() -> Legend {
    legend([
        "Diabetes Mellitus, Experimental",
        "Diabetes Mellitus Type 2",
        "Diabetes Mellitus Type 1",
    ])
}

pub fn spam_legend() -> Legend {
    legend(["Non-Spammer", "Spammer"])
}

/// Resolves a raw label as written in the LINQS `.content` files
/// (`Case_Based`, `Agents`, ...) to its class id.
pub fn label_id(legend: &Legend, raw: &str) -> Option<u32> {
    legend
        .iter()
        .find(|(_, name)| name.replace(' ', "_") == raw)
        .map(|(&id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cora_values() {
        let legend = cora_legend();
        assert_eq!(legend.len(), 7);
        assert_eq!(legend[&0], "Theory");
        assert_eq!(legend[&1], "Reinforcement Learning");
        assert_eq!(legend[&2], "Genetic Algorithms");
        assert_eq!(legend[&3], "Neural Networks");
        assert_eq!(legend[&4], "Probabilistic Methods");
        assert_eq!(legend[&5], "Case Based");
        assert_eq!(legend[&6], "Rule Learning");
    }

    #[test]
    fn citeseer_values() {
        let legend = citeseer_legend();
        let expected = Legend::from([
            (0, "AI"),
            (1, "ML"),
            (2, "IR"),
            (3, "DB"),
            (4, "Agents"),
            (5, "HCI"),
        ]);
        assert_eq!(legend, expected);
    }

    #[test]
    fn pubmed_values() {
        let legend = pubmed_legend();
        let expected = Legend::from([
            (0, "Diabetes Mellitus, Experimental"),
            (1, "Diabetes Mellitus Type 2"),
            (2, "Diabetes Mellitus Type 1"),
        ]);
        assert_eq!(legend, expected);
    }

    #[test]
    fn spam_values() {
        assert_eq!(
            spam_legend(),
            Legend::from([(0, "Non-Spammer"), (1, "Spammer")])
        );
    }

    #[rstest]
    #[case("Case_Based", Some(5))]
    #[case("Reinforcement_Learning", Some(1))]
    #[case("Theory", Some(0))]
    #[case("Case Based", None)]
    #[case("Quantum", None)]
    fn raw_cora_labels(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(label_id(&cora_legend(), raw), expected);
    }

    #[test]
    fn raw_citeseer_labels() {
        let legend = citeseer_legend();
        assert_eq!(label_id(&legend, "Agents"), Some(4));
        assert_eq!(label_id(&legend, "HCI"), Some(5));
    }
}
