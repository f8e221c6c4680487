//! Fixed dropdown vocabularies: OTC medications, diseases and comparison targets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a submitted name is not part of a fixed list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown medication: {0}")]
    UnknownMedication(String),
    #[error("unknown disease: {0}")]
    UnknownDisease(String),
    #[error("unknown comparison kind: {0}")]
    UnknownComparison(String),
}

/// Over-the-counter medication selectable in the first dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Medication {
    Acetaminophen,
    Ibuprofen,
    Aspirin,
    Naproxen,
    Diphenhydramine,
    Loratadine,
    Ranitidine,
    Famotidine,
    Loperamide,
}

impl Medication {
    pub const ALL: [Medication; 9] = [
        Medication::Acetaminophen,
        Medication::Ibuprofen,
        Medication::Aspirin,
        Medication::Naproxen,
        Medication::Diphenhydramine,
        Medication::Loratadine,
        Medication::Ranitidine,
        Medication::Famotidine,
        Medication::Loperamide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Medication::Acetaminophen => "Acetaminophen",
            Medication::Ibuprofen => "Ibuprofen",
            Medication::Aspirin => "Aspirin",
            Medication::Naproxen => "Naproxen",
            Medication::Diphenhydramine => "Diphenhydramine",
            Medication::Loratadine => "Loratadine",
            Medication::Ranitidine => "Ranitidine",
            Medication::Famotidine => "Famotidine",
            Medication::Loperamide => "Loperamide",
        }
    }
}

/// Chronic condition selectable in the second dropdown of the disease flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Disease {
    Cerebrovascular,
    Cardiovascular,
    Diabetes,
    Asthma,
    Kidney,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Cerebrovascular,
        Disease::Cardiovascular,
        Disease::Diabetes,
        Disease::Asthma,
        Disease::Kidney,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Disease::Cerebrovascular => "Cerebrovascular Disease",
            Disease::Cardiovascular => "Cardiovascular Disease",
            Disease::Diabetes => "Diabetes",
            Disease::Asthma => "Asthma",
            Disease::Kidney => "Kidney Disease",
        }
    }
}

fn lookup<T: Copy>(all: &[T], name: &str, label: impl Fn(T) -> &'static str) -> Option<T> {
    let needle = name.trim();
    all.iter()
        .copied()
        .find(|item| label(*item).eq_ignore_ascii_case(needle))
}

impl FromStr for Medication {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, Self::name).ok_or_else(|| CatalogError::UnknownMedication(s.into()))
    }
}

impl FromStr for Disease {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(&Self::ALL, s, Self::name).ok_or_else(|| CatalogError::UnknownDisease(s.into()))
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Medication {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Disease {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Medication> for String {
    fn from(value: Medication) -> Self {
        value.name().to_string()
    }
}

impl From<Disease> for String {
    fn from(value: Disease) -> Self {
        value.name().to_string()
    }
}

/// Which list the second dropdown draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonKind {
    Disease,
    Medication,
}

impl ComparisonKind {
    /// Display names offered by the second dropdown.
    pub fn options(self) -> Vec<&'static str> {
        match self {
            ComparisonKind::Disease => Disease::ALL.iter().map(|d| d.name()).collect(),
            ComparisonKind::Medication => Medication::ALL.iter().map(|m| m.name()).collect(),
        }
    }

    /// Label shown above the second dropdown.
    pub fn label(self) -> &'static str {
        match self {
            ComparisonKind::Disease => "Select Disease",
            ComparisonKind::Medication => "Select Second OTC Medication",
        }
    }

    pub fn parse(self, name: &str) -> Result<Comparison, CatalogError> {
        match self {
            ComparisonKind::Disease => name.parse().map(Comparison::Disease),
            ComparisonKind::Medication => name.parse().map(Comparison::Medication),
        }
    }
}

impl FromStr for ComparisonKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disease" => Ok(ComparisonKind::Disease),
            "medication" => Ok(ComparisonKind::Medication),
            other => Err(CatalogError::UnknownComparison(other.to_string())),
        }
    }
}

/// The selection the primary medication is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Comparison {
    Disease(Disease),
    Medication(Medication),
}

impl Comparison {
    pub fn kind(&self) -> ComparisonKind {
        match self {
            Comparison::Disease(_) => ComparisonKind::Disease,
            Comparison::Medication(_) => ComparisonKind::Medication,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Comparison::Disease(d) => d.name(),
            Comparison::Medication(m) => m.name(),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_case_insensitively() {
        for med in Medication::ALL {
            assert_eq!(med.name().to_uppercase().parse::<Medication>(), Ok(med));
        }
        for disease in Disease::ALL {
            assert_eq!(disease.name().parse::<Disease>(), Ok(disease));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "Warfarin".parse::<Medication>(),
            Err(CatalogError::UnknownMedication("Warfarin".into()))
        );
        assert!(ComparisonKind::Disease.parse("Ibuprofen").is_err());
        assert_eq!(
            ComparisonKind::Medication.parse("Ibuprofen"),
            Ok(Comparison::Medication(Medication::Ibuprofen))
        );
    }

    #[test]
    fn comparison_serialises_with_kind_tag() {
        let json = serde_json::to_value(Comparison::Disease(Disease::Kidney)).unwrap();
        assert_eq!(json["kind"], "disease");
        assert_eq!(json["name"], "Kidney Disease");
    }
}
