//! Habitica skill attributes inferred from Todoist labels.

use super::{LabelId, SourceLabel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Habitica skill attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Strength.
    #[serde(rename = "str")]
    Strength,
    /// Intelligence.
    #[serde(rename = "int")]
    Intelligence,
    /// Constitution.
    #[serde(rename = "con")]
    Constitution,
    /// Perception.
    #[serde(rename = "per")]
    Perception,
}

impl Attribute {
    /// Returns the Habitica wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "str",
            Self::Intelligence => "int",
            Self::Constitution => "con",
            Self::Perception => "per",
        }
    }

    /// Maps a label name onto an attribute using the fixed synonym lists.
    ///
    /// Names are trimmed and compared case-insensitively.
    #[must_use]
    pub fn from_label_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "str" | "strength" | "physical" | "phy" => Some(Self::Strength),
            "int" | "intelligence" | "mental" | "men" => Some(Self::Intelligence),
            "con" | "constitution" | "social" | "soc" => Some(Self::Constitution),
            "per" | "perception" | "other" | "oth" => Some(Self::Perception),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label-to-attribute lookup built once per run from the label listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    by_label: HashMap<LabelId, Attribute>,
}

impl AttributeTable {
    /// Builds the table, keeping only labels whose name is a known synonym.
    #[must_use]
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a SourceLabel>) -> Self {
        let by_label = labels
            .into_iter()
            .filter_map(|label| {
                Attribute::from_label_name(&label.name)
                    .map(|attribute| (label.id.clone(), attribute))
            })
            .collect();
        Self { by_label }
    }

    /// Number of labels that map to an attribute.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Returns `true` when no label maps to an attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    /// Returns the attribute of the first label, in task order, that has one.
    #[must_use]
    pub fn classify(&self, labels: &[LabelId]) -> Option<Attribute> {
        labels.iter().find_map(|label| self.by_label.get(label).copied())
    }
}
