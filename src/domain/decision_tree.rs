// Decision tree classifier for milk quality
use crate::domain::quality::QualityClass;
use crate::domain::reading::{Feature, FeatureVector};
use std::sync::LazyLock;

/// Class returned when the feature tested at a node is unknown.
pub const INCOMPLETE_DATA_CLASS: QualityClass = QualityClass::Sedang;

#[derive(Debug, Clone, PartialEq)]
pub enum DecisionNode {
    Internal {
        feature: Feature,
        threshold: f64,
        left: Box<DecisionNode>,
        right: Box<DecisionNode>,
    },
    Leaf(QualityClass),
}

impl DecisionNode {
    /// Walks the tree. `value < threshold` goes left, everything else goes right.
    pub fn classify(&self, vector: &FeatureVector) -> QualityClass {
        let mut node = self;
        loop {
            match node {
                DecisionNode::Leaf(class) => return *class,
                DecisionNode::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let Some(value) = vector.get(*feature) else {
                        return INCOMPLETE_DATA_CLASS;
                    };
                    node = if value < *threshold { left.as_ref() } else { right.as_ref() };
                }
            }
        }
    }

    /// Number of internal nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            DecisionNode::Leaf(_) => 0,
            DecisionNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn count_leaves(&self, class: QualityClass) -> usize {
        match self {
            DecisionNode::Leaf(c) => usize::from(*c == class),
            DecisionNode::Internal { left, right, .. } => {
                left.count_leaves(class) + right.count_leaves(class)
            }
        }
    }
}

fn split(feature: Feature, threshold: f64, left: DecisionNode, right: DecisionNode) -> DecisionNode {
    DecisionNode::Internal {
        feature,
        threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn leaf(class: QualityClass) -> DecisionNode {
    DecisionNode::Leaf(class)
}

/// Hand-authored goat milk quality tree.
///
/// Reference ranges it encodes:
/// - pH 6.5-6.9 optimal, below 6.0 or from 7.2 poor
/// - storage temperature 4-8°C good, from 12°C (fresh taste) or 15°C (bad smell) poor
/// - fat from 3.5% good, turbidity below 0.5 clear, colour from 245 clean white
pub static MILK_QUALITY_TREE: LazyLock<DecisionNode> = LazyLock::new(build_tree);

fn build_tree() -> DecisionNode {
    use Feature::*;
    use QualityClass::*;

    // odor < 0: rancid smell
    let bad_odor = split(
        Taste,
        -0.5,
        leaf(Buruk),
        split(
            Ph,
            6.0,
            leaf(Buruk),
            split(Temperature, 15.0, leaf(Sedang), leaf(Buruk)),
        ),
    );

    let stale_taste = split(
        Ph,
        6.3,
        leaf(Sedang),
        split(
            Temperature,
            10.0,
            leaf(Sedang),
            split(Turbidity, 1.5, leaf(Sedang), leaf(Buruk)),
        ),
    );

    // 4 <= temperature < 8
    let optimal_storage = split(
        Fat,
        3.5,
        split(Colour, 240.0, leaf(Sedang), leaf(Sedang)),
        split(
            Turbidity,
            0.5,
            split(Colour, 245.0, leaf(Sedang), leaf(Baik)),
            leaf(Sedang),
        ),
    );

    // 6.5 <= ph < 6.9
    let optimal_ph = split(
        Temperature,
        4.0,
        leaf(Sedang),
        split(
            Temperature,
            8.0,
            optimal_storage,
            split(Temperature, 12.0, leaf(Sedang), leaf(Buruk)),
        ),
    );

    let fresh_taste = split(
        Ph,
        6.5,
        split(Temperature, 8.0, leaf(Sedang), leaf(Sedang)),
        split(
            Ph,
            6.9,
            optimal_ph,
            split(Ph, 7.2, leaf(Sedang), leaf(Buruk)),
        ),
    );

    split(
        Odor,
        0.0,
        bad_odor,
        split(Taste, 0.5, stale_taste, fresh_taste),
    )
}

/// Classifies a feature vector with [`MILK_QUALITY_TREE`].
pub fn classify(vector: &FeatureVector) -> QualityClass {
    MILK_QUALITY_TREE.classify(vector)
}
