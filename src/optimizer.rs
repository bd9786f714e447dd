use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerKind {
    #[serde(rename = "LazyAdamOptimizer")]
    LazyAdam,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerParams {
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            beta1: 0.9,
            beta2: 0.997,
            epsilon: 1e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LrPolicyKind {
    #[serde(rename = "transformer_policy")]
    TransformerPolicy,
}

/// Parameters of the warmup-then-decay schedule. `d_model` must match the
/// model hidden size; the schedule scales with its inverse square root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LrPolicyParams {
    pub learning_rate: f64,
    pub warmup_steps: usize,
    pub d_model: usize,
}

impl LrPolicyParams {
    pub fn new(d_model: usize) -> Self {
        Self {
            learning_rate: 2.0,
            warmup_steps: 8000,
            d_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_identifier() {
        let json = serde_json::to_string(&OptimizerKind::LazyAdam).unwrap();
        assert_eq!(json, r#""LazyAdamOptimizer""#);
    }

    #[test]
    fn test_lr_policy_identifier() {
        let json = serde_json::to_string(&LrPolicyKind::TransformerPolicy).unwrap();
        assert_eq!(json, r#""transformer_policy""#);
    }

    #[test]
    fn test_adam_defaults() {
        let params = OptimizerParams::default();
        assert_eq!(params.beta1, 0.9);
        assert_eq!(params.beta2, 0.997);
        assert_eq!(params.epsilon, 1e-9);
    }
}
