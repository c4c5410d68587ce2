// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use cases in
// Layer 2. Only this layer prints to stdout.
//
//   1. `config`  — compute and save the configuration record
//   2. `preview` — pull a few training batches and log them
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConfigArgs, PreviewArgs};

use crate::data::loader::Flickr8kSource;

#[derive(Parser, Debug)]
#[command(
    name = "caption-pipeline",
    version,
    about = "Caption corpus statistics and next-word training batches for image captioning."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Config(args)  => run_config(args),
            Commands::Preview(args) => run_preview(args),
        }
    }
}

fn run_config(args: ConfigArgs) -> Result<()> {
    use crate::application::config_use_case::ConfigUseCase;

    let source   = Flickr8kSource::new(&args.data_dir);
    let use_case = ConfigUseCase::new(source, &args.data_dir, args.defaults.into());
    let config   = use_case.execute()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    use crate::application::preview_use_case::PreviewUseCase;

    tracing::info!("Previewing {} batches from '{}'", args.batches, args.data_dir.display());

    let source   = Flickr8kSource::new(&args.data_dir);
    let use_case = PreviewUseCase::new(source, args.into());
    let report   = use_case.execute()?;

    println!(
        "Pulled {} batches ({} examples): feature_dim = {}, max_caption_length = {}",
        report.batches, report.examples, report.feature_dim, report.sequence_len
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::Split;

    #[test]
    fn test_preview_defaults() {
        let cli = Cli::try_parse_from(["caption-pipeline", "preview"]).unwrap();
        match cli.command {
            Commands::Preview(args) => {
                assert_eq!(args.mode, Split::Train);
                assert_eq!(args.batches, 3);
                assert_eq!(args.defaults.batch_size, 100);
                assert!(!args.loader);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_overrides() {
        let cli = Cli::try_parse_from([
            "caption-pipeline", "config", "--data-dir", "flickr", "--embedding-dim", "256",
        ])
        .unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.data_dir, std::path::PathBuf::from("flickr"));
                assert_eq!(args.defaults.embedding_dim, 256);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_mode_is_rejected() {
        let result = Cli::try_parse_from(["caption-pipeline", "preview", "--mode", "holdout"]);
        assert!(result.is_err());
    }
}
