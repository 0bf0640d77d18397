use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ArtifactError;
use crate::prediction::categories::{Gender, SchoolGrade, UsagePurpose};

/// Model inputs that were label-encoded at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoricalField {
    Gender,
    SchoolGrade,
    PhoneUsagePurpose,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Gender,
        CategoricalField::SchoolGrade,
        CategoricalField::PhoneUsagePurpose,
    ];

    /// Column name used by the training dataset and the encoder export.
    pub const fn column(self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::SchoolGrade => "School_Grade",
            CategoricalField::PhoneUsagePurpose => "Phone_Usage_Purpose",
        }
    }

    /// Every label the category mapper can produce for this field.
    pub fn mapper_vocabulary(self) -> Vec<&'static str> {
        match self {
            CategoricalField::Gender => Gender::ALL.iter().map(|g| g.label()).collect(),
            CategoricalField::SchoolGrade => SchoolGrade::ALL.iter().map(|g| g.label()).collect(),
            CategoricalField::PhoneUsagePurpose => {
                UsagePurpose::ALL.iter().map(|p| p.label()).collect()
            }
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Raised when a mapped label has no code in the fitted encoder. Signals that
/// the category mapper and the deployed artifact come from different vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("encoder for {field} was never fit on label '{label}'")]
pub struct VocabularyDrift {
    pub field: CategoricalField,
    pub label: String,
}

/// Label-to-code table. Codes are positions in the fitted class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn code(&self, label: &str) -> Option<u32> {
        self.classes
            .iter()
            .position(|class| class == label)
            .map(|index| index as u32)
    }
}

/// The three fitted encoders of one training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoders {
    encoders: BTreeMap<CategoricalField, LabelEncoder>,
}

impl LabelEncoders {
    /// Builds the set from the exported `column -> classes` map. Columns other
    /// than the three categorical inputs are ignored.
    pub fn from_classes(
        mut classes: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ArtifactError> {
        let mut encoders = BTreeMap::new();
        for field in CategoricalField::ALL {
            let labels = classes
                .remove(field.column())
                .ok_or(ArtifactError::MissingEncoder { field })?;
            if labels.is_empty() {
                return Err(ArtifactError::EmptyEncoder { field });
            }
            encoders.insert(field, LabelEncoder::new(labels));
        }
        Ok(Self { encoders })
    }

    pub fn encoder(&self, field: CategoricalField) -> &LabelEncoder {
        // from_classes guarantees all three fields are present
        &self.encoders[&field]
    }

    pub fn encode(&self, field: CategoricalField, label: &str) -> Result<u32, VocabularyDrift> {
        self.encoder(field)
            .code(label)
            .ok_or_else(|| VocabularyDrift {
                field,
                label: label.to_string(),
            })
    }

    pub fn known_labels(&self, field: CategoricalField) -> &[String] {
        self.encoder(field).classes()
    }

    /// Confirms every label the mapper can emit has a code.
    pub fn check_vocabulary(&self) -> Result<(), VocabularyDrift> {
        for field in CategoricalField::ALL {
            for label in field.mapper_vocabulary() {
                self.encode(field, label)?;
            }
        }
        Ok(())
    }
}
