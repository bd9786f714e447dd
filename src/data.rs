use serde::{Deserialize, Serialize};

// Token ids reserved by the shared BPE vocabulary. The data layer prepends
// none of these itself; the framework inserts them during batching.
pub const PAD_ID: u32 = 0;
pub const EOS_ID: u32 = 1;
pub const S_ID: u32 = 2;
pub const UNK_ID: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataLayerKind {
    ParallelTextDataLayer,
}

/// Per-mode settings for the parallel text data layer: where the corpora and
/// vocabularies live and how they are batched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataLayerParams {
    pub src_vocab_file: String,
    pub tgt_vocab_file: String,
    pub source_file: String,
    pub target_file: String,
    pub delimiter: String,
    pub shuffle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_buffer_size: Option<usize>,
    pub repeat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_parallel_calls: Option<usize>,
    pub max_length: usize,
    #[serde(default)]
    pub pad_vocab_to_eight: bool,
}

impl DataLayerParams {
    /// Non-shuffling, non-repeating spec over a shared vocabulary. Train mode
    /// starts from this and flips the streaming flags on.
    pub fn sequential(
        vocab_file: String,
        source_file: String,
        target_file: String,
        max_length: usize,
    ) -> Self {
        Self {
            src_vocab_file: vocab_file.clone(),
            tgt_vocab_file: vocab_file,
            source_file,
            target_file,
            delimiter: " ".to_string(),
            shuffle: false,
            shuffle_buffer_size: None,
            repeat: false,
            map_parallel_calls: None,
            max_length,
            pad_vocab_to_eight: false,
        }
    }

    pub fn files(&self) -> [&str; 4] {
        [
            &self.src_vocab_file,
            &self.tgt_vocab_file,
            &self.source_file,
            &self.target_file,
        ]
    }
}

/// Joins the environment-specific data root with a literal corpus filename,
/// inserting exactly one separator.
pub fn join_data_root(data_root: &str, name: &str) -> String {
    if data_root.is_empty() || data_root.ends_with('/') {
        format!("{data_root}{name}")
    } else {
        format!("{data_root}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_data_root() {
        assert_eq!(
            join_data_root("data/wmt16_de_en/", "m_common.vocab"),
            "data/wmt16_de_en/m_common.vocab"
        );
        assert_eq!(
            join_data_root("data/wmt16_de_en", "m_common.vocab"),
            "data/wmt16_de_en/m_common.vocab"
        );
        assert_eq!(join_data_root("", "m_common.vocab"), "m_common.vocab");
    }

    #[test]
    fn test_sequential_shares_vocab() {
        let params = DataLayerParams::sequential(
            "vocab".to_string(),
            "src.tok".to_string(),
            "tgt.tok".to_string(),
            256,
        );
        assert_eq!(params.src_vocab_file, params.tgt_vocab_file);
        assert!(!params.shuffle);
        assert!(!params.repeat);
        assert_eq!(params.delimiter, " ");
        assert_eq!(params.max_length, 256);
        assert_eq!(params.files(), ["vocab", "vocab", "src.tok", "tgt.tok"]);
    }

    #[test]
    fn test_special_token_ids() {
        assert_eq!(PAD_ID, 0);
        assert_eq!(EOS_ID, 1);
        assert_eq!(S_ID, 2);
        assert_eq!(UNK_ID, 3);
    }
}
