// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands: `config` and `preview`.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::preview_use_case::PreviewConfig;
use crate::domain::{
    config::{ConfigDefaults, DEFAULT_BATCH_SIZE, DEFAULT_EMBEDDING_DIM},
    split::Split,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan all captions and write model/config.json
    Config(ConfigArgs),

    /// Build the batch generator and inspect the first batches
    Preview(PreviewArgs),
}

/// Hyperparameters that are not derived from the captions.
#[derive(Args, Debug, Clone, Copy)]
pub struct DefaultsArgs {
    /// Width of the word embedding layer
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    pub embedding_dim: usize,

    /// Training examples per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl From<DefaultsArgs> for ConfigDefaults {
    fn from(a: DefaultsArgs) -> Self {
        ConfigDefaults {
            embedding_dim: a.embedding_dim,
            batch_size:    a.batch_size,
        }
    }
}

/// All arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Directory holding Flickr8k.token.txt and the model/ subdirectory
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub defaults: DefaultsArgs,
}

/// All arguments for the `preview` command.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Directory holding the caption files and model/<mode>_image_encoding.pkl
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Dataset split: train, dev or test
    #[arg(long, default_value = "train")]
    pub mode: Split,

    /// Number of batches to pull
    #[arg(long, default_value_t = 3)]
    pub batches: usize,

    /// Iterate one finite epoch through Burn's DataLoader
    /// instead of the endless generator
    #[arg(long)]
    pub loader: bool,

    /// Used only when model/config.json does not exist yet
    #[command(flatten)]
    pub defaults: DefaultsArgs,
}

impl From<PreviewArgs> for PreviewConfig {
    fn from(a: PreviewArgs) -> Self {
        PreviewConfig {
            data_dir:   a.data_dir,
            split:      a.mode,
            batches:    a.batches,
            use_loader: a.loader,
            defaults:   a.defaults.into(),
        }
    }
}
