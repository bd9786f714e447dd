use std::path::Path;

use crate::config::{Mode, RunConfig};
use crate::error::ConfigError;

fn check_head_split(
    component: &'static str,
    hidden_size: usize,
    num_heads: usize,
) -> Result<(), ConfigError> {
    if num_heads == 0 || hidden_size == 0 || hidden_size % num_heads != 0 {
        return Err(ConfigError::HeadSplit {
            component,
            hidden_size,
            num_heads,
        });
    }
    Ok(())
}

fn check_positive(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NotPositive(field.to_string()));
    }
    Ok(())
}

fn check_rate(field: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty(field.to_string()));
    }
    Ok(())
}

impl RunConfig {
    /// Schema-level checks. Everything here can fail before the external
    /// driver ever sees the configuration; filesystem state is checked
    /// separately by [`RunConfig::check_files`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.base_params;
        let encoder = &base.encoder_params;
        let decoder = &base.decoder_params;

        check_head_split("encoder", encoder.hidden_size, encoder.num_heads)?;
        check_head_split("decoder", decoder.hidden_size, decoder.num_heads)?;
        if encoder.hidden_size != decoder.hidden_size {
            return Err(ConfigError::HiddenSizeMismatch {
                encoder: encoder.hidden_size,
                decoder: decoder.hidden_size,
            });
        }
        if base.lr_policy_params.d_model != encoder.hidden_size {
            return Err(ConfigError::DModelMismatch {
                d_model: base.lr_policy_params.d_model,
                hidden_size: encoder.hidden_size,
            });
        }

        check_positive("num_gpus", base.num_gpus)?;
        check_positive("batch_size_per_gpu", base.batch_size_per_gpu)?;
        check_positive("max_steps", base.max_steps)?;
        check_positive("encoder_layers", encoder.encoder_layers)?;
        check_positive("num_hidden_layers", decoder.num_hidden_layers)?;
        check_positive("filter_size", encoder.filter_size)?;
        check_positive("warmup_steps", base.lr_policy_params.warmup_steps)?;
        check_positive("beam_size", decoder.beam_size)?;
        check_non_empty("logdir", &base.logdir)?;

        if base.lr_policy_params.learning_rate <= 0.0 {
            return Err(ConfigError::NotPositive("learning_rate".to_string()));
        }

        check_rate("encoder attention_dropout", encoder.attention_dropout)?;
        check_rate("encoder relu_dropout", encoder.relu_dropout)?;
        check_rate(
            "encoder layer_postprocess_dropout",
            encoder.layer_postprocess_dropout,
        )?;
        check_rate("decoder attention_dropout", decoder.attention_dropout)?;
        check_rate("decoder relu_dropout", decoder.relu_dropout)?;
        check_rate(
            "decoder layer_postprocess_dropout",
            decoder.layer_postprocess_dropout,
        )?;
        check_rate("label_smoothing", base.loss_params.label_smoothing)?;

        for mode in Mode::ALL {
            let params = self.mode_params(mode);
            check_positive(&format!("{mode} batch_size_per_gpu"), self.batch_size(mode))?;

            let data = &params.data_layer_params;
            check_positive(&format!("{mode} max_length"), data.max_length)?;
            check_non_empty(&format!("{mode} delimiter"), &data.delimiter)?;
            check_non_empty(&format!("{mode} src_vocab_file"), &data.src_vocab_file)?;
            check_non_empty(&format!("{mode} tgt_vocab_file"), &data.tgt_vocab_file)?;
            check_non_empty(&format!("{mode} source_file"), &data.source_file)?;
            check_non_empty(&format!("{mode} target_file"), &data.target_file)?;
        }

        Ok(())
    }

    /// Verifies that every vocabulary and corpus file referenced by any mode
    /// exists. Split out from [`RunConfig::validate`] so a configuration can
    /// be checked on a machine that does not hold the data.
    pub fn check_files(&self) -> Result<(), ConfigError> {
        for mode in Mode::ALL {
            let data = &self.mode_params(mode).data_layer_params;
            for file in data.files() {
                if !Path::new(file).exists() {
                    return Err(ConfigError::MissingFile {
                        mode,
                        path: file.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::RunConfig;

    #[test]
    fn test_default_config_is_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_indivisible_heads() {
        let mut config = RunConfig::default();
        config.base_params.encoder_params.num_heads = 7;
        match config.validate() {
            Err(ConfigError::HeadSplit {
                component,
                hidden_size,
                num_heads,
            }) => {
                assert_eq!(component, "encoder");
                assert_eq!(hidden_size, 512);
                assert_eq!(num_heads, 7);
            }
            other => panic!("expected HeadSplit, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_hidden_size_mismatch() {
        let mut config = RunConfig::default();
        config.base_params.decoder_params.hidden_size = 256;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HiddenSizeMismatch {
                encoder: 512,
                decoder: 256
            })
        ));
    }

    #[test]
    fn test_rejects_stale_lr_policy_d_model() {
        let mut config = RunConfig::default();
        config.base_params.lr_policy_params.d_model = 1024;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DModelMismatch { d_model: 1024, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let mut config = RunConfig::default();
        config.eval_params.batch_size_per_gpu = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive(_))));
    }

    #[test]
    fn test_rejects_empty_delimiter() {
        let mut config = RunConfig::default();
        config.infer_params.data_layer_params.delimiter.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Empty(_))));
    }

    #[test]
    fn test_rejects_dropout_of_one() {
        let mut config = RunConfig::default();
        config.base_params.decoder_params.attention_dropout = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_check_files_reports_mode_and_path() {
        let config = RunConfig::wmt16_en_de("/nonexistent/wmt16");
        match config.check_files() {
            Err(ConfigError::MissingFile { mode, path }) => {
                assert_eq!(mode, Mode::Train);
                assert!(path.starts_with("/nonexistent/wmt16/"));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn test_check_files_accepts_existing_data() {
        let root = std::env::temp_dir().join("text2text-run-config-data");
        fs::create_dir_all(&root).unwrap();
        let root = root.to_str().unwrap().to_string();

        let mut config = RunConfig::wmt16_en_de(&root);
        // Point the checkpoint-relative and bundle-relative modes at the
        // same directory so one set of files covers all five modes.
        config.interactive_infer_params.data_layer_params =
            config.infer_params.data_layer_params.clone();
        config.serving_infer_params.data_layer_params =
            config.infer_params.data_layer_params.clone();

        for mode in Mode::ALL {
            for file in config.mode_params(mode).data_layer_params.files() {
                fs::write(file, "").unwrap();
            }
        }

        config.check_files().unwrap();
    }
}
