use serde::{Deserialize, Serialize};

use crate::data::{EOS_ID, PAD_ID, S_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoderKind {
    TransformerDecoder,
}

/// Hyperparameters for the framework's Transformer decoder. Mirrors the
/// encoder shape plus the beam search knobs and the special token ids the
/// decoder emits around generated sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderParams {
    pub num_hidden_layers: usize,
    pub hidden_size: usize,
    pub num_heads: usize,
    pub attention_dropout: f32,
    pub relu_dropout: f32,
    pub filter_size: usize,
    pub layer_postprocess_dropout: f32,
    pub beam_size: usize,
    /// Length normalization exponent for beam scoring.
    pub alpha: f32,
    /// How far past the source length decoding may run.
    pub extra_decode_length: usize,
    #[serde(rename = "EOS_ID")]
    pub eos_id: u32,
    #[serde(rename = "GO_SYMBOL")]
    pub go_symbol: u32,
    #[serde(rename = "END_SYMBOL")]
    pub end_symbol: u32,
    #[serde(rename = "PAD_SYMBOL")]
    pub pad_symbol: u32,
}

impl DecoderParams {
    pub fn new(num_layers: usize, d_model: usize, num_heads: usize) -> Self {
        Self {
            num_hidden_layers: num_layers,
            hidden_size: d_model,
            num_heads,
            attention_dropout: 0.1,
            relu_dropout: 0.1,
            filter_size: 4 * d_model,
            layer_postprocess_dropout: 0.1,
            beam_size: 4,
            alpha: 0.6,
            extra_decode_length: 50,
            eos_id: EOS_ID,
            go_symbol: S_ID,
            end_symbol: EOS_ID,
            pad_symbol: PAD_ID,
        }
    }

    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_heads
    }
}
