//! Random forest regressor evaluated from its exported tree arrays.
//!
//! The export keeps scikit-learn's parallel-array layout per tree:
//!
//! ```json
//! {
//!   "n_features": 21,
//!   "trees": [
//!     {
//!       "children_left":  [1, -1, -1],
//!       "children_right": [2, -1, -1],
//!       "feature":        [3, -2, -2],
//!       "threshold":      [6.0, -2.0, -2.0],
//!       "value":          [5.1, 3.2, 9.6]
//!     }
//!   ]
//! }
//! ```
//!
//! A sample descends left when `x[feature] <= threshold`; the forest output is
//! the mean of the reached leaf values.

use serde::Deserialize;

use super::{ArtifactError, ScoringModel};

const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn from_export(
        position: usize,
        export: TreeExport,
        n_features: usize,
    ) -> Result<Self, ArtifactError> {
        let invalid = |detail: String| ArtifactError::InvalidForest {
            detail: format!("tree {position}: {detail}"),
        };

        let len = export.children_left.len();
        if len == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if [
            export.children_right.len(),
            export.feature.len(),
            export.threshold.len(),
            export.value.len(),
        ]
        .iter()
        .any(|other| *other != len)
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        let mut nodes = Vec::with_capacity(len);
        for index in 0..len {
            let left = export.children_left[index];
            let right = export.children_right[index];

            if left == TREE_LEAF && right == TREE_LEAF {
                nodes.push(Node::Leaf(export.value[index]));
                continue;
            }

            // scikit-learn numbers children after their parent, which also rules out cycles
            let child = |raw: i64| -> Result<usize, ArtifactError> {
                usize::try_from(raw)
                    .ok()
                    .filter(|child| *child > index && *child < len)
                    .ok_or_else(|| invalid(format!("node {index} has invalid child {raw}")))
            };
            let feature = usize::try_from(export.feature[index])
                .ok()
                .filter(|feature| *feature < n_features)
                .ok_or_else(|| {
                    invalid(format!(
                        "node {index} splits on feature {} outside 0..{n_features}",
                        export.feature[index]
                    ))
                })?;

            nodes.push(Node::Split {
                feature,
                threshold: export.threshold[index],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }
}

/// Averaging ensemble of regression trees.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Parses and validates an exported forest.
    pub fn from_export_str(raw: &str) -> Result<Self, ArtifactError> {
        let export: ForestExport =
            serde_json::from_str(raw).map_err(|source| ArtifactError::InvalidForest {
                detail: source.to_string(),
            })?;
        export.validate()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl ScoringModel for RandomForest {
    fn feature_count(&self) -> usize {
        self.n_features
    }

    fn score(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        total / self.trees.len() as f64
    }

    fn describe(&self) -> String {
        format!(
            "random forest ({} trees, {} features)",
            self.trees.len(),
            self.n_features
        )
    }
}

/// Forest as serialized by the training pipeline, before validation.
#[derive(Debug, Deserialize)]
pub(super) struct ForestExport {
    n_features: usize,
    trees: Vec<TreeExport>,
}

impl ForestExport {
    pub(super) fn validate(self) -> Result<RandomForest, ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::InvalidForest {
                detail: "forest has no trees".to_string(),
            });
        }

        let n_features = self.n_features;
        let trees = self
            .trees
            .into_iter()
            .enumerate()
            .map(|(position, export)| DecisionTree::from_export(position, export, n_features))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RandomForest { n_features, trees })
    }
}

#[derive(Debug, Deserialize)]
struct TreeExport {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}
