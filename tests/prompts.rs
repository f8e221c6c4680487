use phrs_assistant::{
    assess::prompt::{risk_prompt, score_prompt, TIME_HORIZONS},
    catalog::{Comparison, Disease, Medication},
};

fn all_names() -> Vec<&'static str> {
    Medication::ALL
        .iter()
        .map(|m| m.name())
        .chain(Disease::ALL.iter().map(|d| d.name()))
        .collect()
}

fn names_in(prompt: &str) -> Vec<&'static str> {
    all_names()
        .into_iter()
        .filter(|name| prompt.contains(name))
        .collect()
}

const RISKS: &str = "1. Stomach upset: Irritation of the lining. Severity: Low. Frequency: Common.";

#[test]
fn risk_prompt_names_only_the_selected_medication() {
    for med in Medication::ALL {
        let prompt = risk_prompt(med);
        assert_eq!(names_in(&prompt), vec![med.name()], "{med}");
        assert!(prompt.contains("top 10"));
        assert!(prompt.contains("Low, Moderate, High, or Severe"));
        assert!(prompt.contains("Rare, Uncommon, Common, or Very Common"));
    }
}

#[test]
fn disease_score_prompt_names_exactly_the_pair() {
    for med in Medication::ALL {
        for disease in Disease::ALL {
            let prompt = score_prompt(med, RISKS, &Comparison::Disease(disease));
            let mut expected = vec![med.name(), disease.name()];
            let mut found = names_in(&prompt);
            expected.sort();
            found.sort();
            assert_eq!(found, expected);
            assert!(prompt.contains(RISKS));
            assert!(prompt.contains("1-100"));
        }
    }
}

#[test]
fn medication_score_prompt_covers_time_horizons() {
    for first in Medication::ALL {
        for second in Medication::ALL {
            let prompt = score_prompt(first, RISKS, &Comparison::Medication(second));
            let mut expected = vec![first.name(), second.name()];
            expected.sort();
            expected.dedup();
            let mut found = names_in(&prompt);
            found.sort();
            assert_eq!(found, expected);
            for horizon in TIME_HORIZONS {
                assert!(prompt.contains(horizon), "{horizon}");
            }
        }
    }
}

#[test]
fn disease_prompt_has_no_time_horizon_breakdown() {
    let prompt = score_prompt(
        Medication::Aspirin,
        RISKS,
        &Comparison::Disease(Disease::Asthma),
    );
    assert!(!prompt.contains("5 years"));
    assert!(prompt.contains("use over time"));
}
