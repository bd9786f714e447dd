use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossKind {
    PaddedCrossEntropyLossWithSmoothing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossParams {
    pub label_smoothing: f32,
}

impl Default for LossParams {
    fn default() -> Self {
        Self {
            label_smoothing: 0.1,
        }
    }
}
