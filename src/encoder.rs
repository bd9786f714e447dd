use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncoderKind {
    TransformerEncoder,
}

/// Hyperparameters handed verbatim to the framework's Transformer encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderParams {
    pub encoder_layers: usize,
    pub hidden_size: usize,
    pub num_heads: usize,
    pub attention_dropout: f32,
    pub filter_size: usize,
    pub relu_dropout: f32,
    pub layer_postprocess_dropout: f32,
    pub pad_embeddings_2_eight: bool,
    pub remove_padding: bool,
}

impl EncoderParams {
    pub fn new(num_layers: usize, d_model: usize, num_heads: usize) -> Self {
        Self {
            encoder_layers: num_layers,
            hidden_size: d_model,
            num_heads,
            attention_dropout: 0.1,
            filter_size: 4 * d_model,
            relu_dropout: 0.1,
            layer_postprocess_dropout: 0.1,
            pad_embeddings_2_eight: true,
            remove_padding: true,
        }
    }

    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_heads
    }
}
