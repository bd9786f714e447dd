use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::data::{join_data_root, DataLayerKind, DataLayerParams};
use crate::decoder::{DecoderKind, DecoderParams};
use crate::encoder::{EncoderKind, EncoderParams};
use crate::error::ConfigError;
use crate::loss::{LossKind, LossParams};
use crate::optimizer::{LrPolicyKind, LrPolicyParams, OptimizerKind, OptimizerParams};

pub const D_MODEL: usize = 512;
pub const NUM_LAYERS: usize = 6;
pub const NUM_HEADS: usize = 8;

const VOCAB_FILE: &str = "m_common.vocab";
const TRAIN_SOURCE: &str = "train.clean.en.shuffled.BPE_common.32K.tok";
const TRAIN_TARGET: &str = "train.clean.de.shuffled.BPE_common.32K.tok";
const EVAL_SOURCE: &str = "wmt13-en-de.src.BPE_common.32K.tok";
const EVAL_TARGET: &str = "wmt13-en-de.ref.BPE_common.32K.tok";
const INFER_SOURCE: &str = "wmt14-en-de.src.BPE_common.32K.tok";
const SERVING_DATA_ROOT: &str = "data/translation_data/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseModel {
    Text2Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Train,
    Eval,
    Infer,
    InteractiveInfer,
    ServingInfer,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Train,
        Mode::Eval,
        Mode::Infer,
        Mode::InteractiveInfer,
        Mode::ServingInfer,
    ];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Train => "train",
            Mode::Eval => "eval",
            Mode::Infer => "infer",
            Mode::InteractiveInfer => "interactive_infer",
            Mode::ServingInfer => "serving_infer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Float32,
    Float16,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LossScaling {
    Backoff,
    #[serde(untagged)]
    Fixed(f64),
}

/// Parameters shared by every mode, passed verbatim to the external training
/// driver together with the component selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseParams {
    pub use_horovod: bool,
    pub num_gpus: usize,
    /// Batch size in sentence pairs. Modes may override it.
    pub batch_size_per_gpu: usize,
    pub max_steps: usize,
    pub save_summaries_steps: usize,
    pub print_loss_steps: usize,
    pub print_samples_steps: usize,
    pub eval_steps: usize,
    pub save_checkpoint_steps: usize,
    /// Checkpoint and summary directory, written by the external driver.
    pub logdir: String,
    pub dtype: Dtype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_scaling: Option<LossScaling>,

    pub optimizer: OptimizerKind,
    pub optimizer_params: OptimizerParams,
    pub lr_policy: LrPolicyKind,
    pub lr_policy_params: LrPolicyParams,
    pub encoder: EncoderKind,
    pub encoder_params: EncoderParams,
    pub decoder: DecoderKind,
    pub decoder_params: DecoderParams,
    pub loss: LossKind,
    pub loss_params: LossParams,
}

/// One mode section: an optional batch size override plus the data layer
/// selection and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size_per_gpu: Option<usize>,
    pub data_layer: DataLayerKind,
    pub data_layer_params: DataLayerParams,
}

/// The complete run configuration: model selection, shared hyperparameters
/// and one data spec per execution mode. Constructed once at startup and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub base_model: BaseModel,
    pub base_params: BaseParams,
    pub train_params: ModeParams,
    pub eval_params: ModeParams,
    pub infer_params: ModeParams,
    pub interactive_infer_params: ModeParams,
    pub serving_infer_params: ModeParams,
}

impl RunConfig {
    /// The WMT16 en-de Transformer-big FP32 run. `data_root` points at the
    /// directory holding the BPE corpora and the shared vocabulary, and must
    /// be substituted for the local environment.
    pub fn wmt16_en_de(data_root: &str) -> Self {
        let logdir = "checkpoints/Transformer-FP32-H-256".to_string();

        let mut train_data = DataLayerParams::sequential(
            join_data_root(data_root, VOCAB_FILE),
            join_data_root(data_root, TRAIN_SOURCE),
            join_data_root(data_root, TRAIN_TARGET),
            56,
        );
        train_data.shuffle = true;
        train_data.shuffle_buffer_size = Some(25000);
        train_data.repeat = true;
        train_data.map_parallel_calls = Some(16);
        train_data.pad_vocab_to_eight = true;

        let eval_data = DataLayerParams::sequential(
            join_data_root(data_root, VOCAB_FILE),
            join_data_root(data_root, EVAL_SOURCE),
            join_data_root(data_root, EVAL_TARGET),
            256,
        );

        // Inference reads the source corpus on both sides; the target side
        // is ignored by the driver but the key must be present.
        let infer_data = DataLayerParams::sequential(
            join_data_root(data_root, VOCAB_FILE),
            join_data_root(data_root, INFER_SOURCE),
            join_data_root(data_root, INFER_SOURCE),
            256,
        );

        // Interactive inference ships vocab and sample corpus with the
        // checkpoint; serving inference reads from a fixed bundle directory.
        let interactive_data = DataLayerParams::sequential(
            join_data_root(&logdir, VOCAB_FILE),
            join_data_root(&logdir, INFER_SOURCE),
            join_data_root(&logdir, INFER_SOURCE),
            256,
        );
        let serving_data = DataLayerParams::sequential(
            join_data_root(SERVING_DATA_ROOT, VOCAB_FILE),
            join_data_root(SERVING_DATA_ROOT, INFER_SOURCE),
            join_data_root(SERVING_DATA_ROOT, INFER_SOURCE),
            256,
        );

        Self {
            base_model: BaseModel::Text2Text,
            base_params: BaseParams {
                use_horovod: false,
                num_gpus: 1,
                batch_size_per_gpu: 256,
                max_steps: 300000,
                save_summaries_steps: 100,
                print_loss_steps: 100,
                print_samples_steps: 100,
                eval_steps: 4001,
                save_checkpoint_steps: 299998,
                logdir,
                dtype: Dtype::Float32,
                loss_scaling: None,
                optimizer: OptimizerKind::LazyAdam,
                optimizer_params: OptimizerParams::default(),
                lr_policy: LrPolicyKind::TransformerPolicy,
                lr_policy_params: LrPolicyParams::new(D_MODEL),
                encoder: EncoderKind::TransformerEncoder,
                encoder_params: EncoderParams::new(NUM_LAYERS, D_MODEL, NUM_HEADS),
                decoder: DecoderKind::TransformerDecoder,
                decoder_params: DecoderParams::new(NUM_LAYERS, D_MODEL, NUM_HEADS),
                loss: LossKind::PaddedCrossEntropyLossWithSmoothing,
                loss_params: LossParams::default(),
            },
            train_params: ModeParams {
                batch_size_per_gpu: None,
                data_layer: DataLayerKind::ParallelTextDataLayer,
                data_layer_params: train_data,
            },
            eval_params: ModeParams {
                batch_size_per_gpu: Some(16),
                data_layer: DataLayerKind::ParallelTextDataLayer,
                data_layer_params: eval_data,
            },
            infer_params: ModeParams {
                batch_size_per_gpu: Some(1),
                data_layer: DataLayerKind::ParallelTextDataLayer,
                data_layer_params: infer_data,
            },
            interactive_infer_params: ModeParams {
                batch_size_per_gpu: Some(1),
                data_layer: DataLayerKind::ParallelTextDataLayer,
                data_layer_params: interactive_data,
            },
            serving_infer_params: ModeParams {
                batch_size_per_gpu: Some(1),
                data_layer: DataLayerKind::ParallelTextDataLayer,
                data_layer_params: serving_data,
            },
        }
    }

    pub fn mode_params(&self, mode: Mode) -> &ModeParams {
        match mode {
            Mode::Train => &self.train_params,
            Mode::Eval => &self.eval_params,
            Mode::Infer => &self.infer_params,
            Mode::InteractiveInfer => &self.interactive_infer_params,
            Mode::ServingInfer => &self.serving_infer_params,
        }
    }

    /// Effective batch size for a mode: the mode override if present,
    /// otherwise the shared value.
    pub fn batch_size(&self, mode: Mode) -> usize {
        self.mode_params(mode)
            .batch_size_per_gpu
            .unwrap_or(self.base_params.batch_size_per_gpu)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        // REPLACE THIS WITH THE PATH TO YOUR WMT DATA
        Self::wmt16_en_de("data/wmt16_de_en/")
    }
}
