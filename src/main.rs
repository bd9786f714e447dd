pub mod config;
pub mod data;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod loss;
pub mod optimizer;
pub mod validate;

use anyhow::{Context, Result};
use config::{Mode, RunConfig};

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::from_file(&path)
            .with_context(|| format!("loading run configuration from {path}"))?,
        None => RunConfig::default(),
    };
    config.validate()?;

    println!("base_model: {:?}", config.base_model);
    println!("logdir: {}", config.base_params.logdir);
    println!(
        "encoder: {:?} ({} layers, d_model {}, {} heads)",
        config.base_params.encoder,
        config.base_params.encoder_params.encoder_layers,
        config.base_params.encoder_params.hidden_size,
        config.base_params.encoder_params.num_heads,
    );
    println!(
        "decoder: {:?} (beam_size {}, alpha {})",
        config.base_params.decoder,
        config.base_params.decoder_params.beam_size,
        config.base_params.decoder_params.alpha,
    );

    for mode in Mode::ALL {
        let data = &config.mode_params(mode).data_layer_params;
        println!(
            "{}: batch_size={} max_length={} source={}",
            mode,
            config.batch_size(mode),
            data.max_length,
            data.source_file,
        );
    }

    if let Err(err) = config.check_files() {
        println!("warning: {err}");
    }

    Ok(())
}
