//! Regression tree ensembles (random forests and boosted trees).
//!
//! Trees are stored structure-of-arrays, one entry per node, with node 0 as
//! the root. A node is a leaf when its left child is [`LEAF`]. Split nodes
//! send a row left when `features[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::AqiError;

/// Child index marking a leaf node.
pub const LEAF: i64 = -1;

/// One regression tree in structure-of-arrays layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    /// Split feature per node; ignored for leaves.
    feature: Vec<i64>,
    /// Split threshold per node; ignored for leaves.
    threshold: Vec<f64>,
    /// Leaf output per node; ignored for split nodes.
    value: Vec<f64>,
}

impl RegressionTree {
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    /// A single-leaf tree that always predicts `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![LEAF], vec![LEAF], vec![LEAF], vec![0.0], vec![value])
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    #[inline]
    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Check structural soundness so that traversal cannot panic or loop.
    pub fn validate(&self, num_features: usize) -> crate::Result<()> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(AqiError::model_load("tree has no nodes"));
        }

        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n_nodes) {
            return Err(AqiError::model_load(format!(
                "tree arrays have mismatched lengths: {} nodes, other arrays {:?}",
                n_nodes, lengths
            )));
        }

        for node in 0..n_nodes {
            if self.is_leaf(node) {
                if self.children_right[node] != LEAF {
                    return Err(AqiError::model_load(format!(
                        "node {node} has a right child but no left child"
                    )));
                }
                if !self.value[node].is_finite() {
                    return Err(AqiError::model_load(format!(
                        "leaf {node} has a non-finite value"
                    )));
                }
                continue;
            }

            for (side, child) in [
                ("left", self.children_left[node]),
                ("right", self.children_right[node]),
            ] {
                // Children must point forward; this also rules out self loops and cycles.
                let in_bounds = usize::try_from(child).is_ok_and(|c| c > node && c < n_nodes);
                if !in_bounds {
                    return Err(AqiError::model_load(format!(
                        "node {node} has invalid {side} child {child} ({n_nodes} nodes)"
                    )));
                }
            }

            let feature_ok = usize::try_from(self.feature[node]).is_ok_and(|f| f < num_features);
            if !feature_ok {
                return Err(AqiError::model_load(format!(
                    "node {} splits on feature {}, model has {} features",
                    node, self.feature[node], num_features
                )));
            }
            if self.threshold[node].is_nan() {
                return Err(AqiError::model_load(format!(
                    "node {node} has a NaN threshold"
                )));
            }
        }

        Ok(())
    }

    /// Leaf value reached by `features`. The tree must have passed [`validate`](Self::validate).
    pub(crate) fn predict_row(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if features[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of all trees (random forest).
    Mean,
    /// Sum of all trees (gradient boosting, learning rate folded into leaves).
    Sum,
}

/// Ensemble of regression trees plus a base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    aggregation: Aggregation,
    #[serde(default)]
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn new(aggregation: Aggregation, base_score: f64, trees: Vec<RegressionTree>) -> Self {
        Self {
            aggregation,
            base_score,
            trees,
        }
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn validate(&self, num_features: usize) -> crate::Result<()> {
        if self.trees.is_empty() {
            return Err(AqiError::model_load("tree ensemble has no trees"));
        }
        if !self.base_score.is_finite() {
            return Err(AqiError::model_load("tree ensemble has a non-finite base score"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(num_features).map_err(|e| match e {
                AqiError::ModelLoad { message } => {
                    AqiError::model_load(format!("tree {idx}: {message}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    pub(crate) fn predict_row(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(features)).sum();
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        self.base_score + combined
    }
}
