use clap::{Parser, Subcommand};
use std::path::PathBuf;

use digitkit::config::FuseSettings;
use digitkit::fusion::{Fuser, PairOrder};

#[derive(Parser)]
#[command(name = "digitkit")]
#[command(about = "Annotate digit boxes and build fused digit images")]
struct Cli {
    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw one box per digit (units, tens, hundreds, thousands) over an image
    Annotate {
        /// Image to open on startup
        #[arg(value_name = "IMAGE")]
        image: Option<PathBuf>,

        /// Save the image with the boxes drawn on it once all digits are done
        #[arg(long, value_name = "PATH")]
        preview: Option<PathBuf>,

        /// Save the boxes as JSON once all digits are done
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },

    /// Join the lower half of each image in one folder to the upper half of
    /// the image at the same position in another folder
    Fuse {
        /// JSON file with first_dir, second_dir, output_dir and order
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Folder providing the lower halves
        #[arg(long, value_name = "DIR")]
        first: Option<PathBuf>,

        /// Folder providing the upper halves
        #[arg(long, value_name = "DIR")]
        second: Option<PathBuf>,

        /// Folder receiving <index>_fusion.jpg files (created if missing)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// How files are ordered before pairing
        #[arg(long, value_enum)]
        order: Option<PairOrder>,

        /// Save intermediate crops to directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    digitkit::logging::init(&args.log_level);

    match args.command {
        Command::Annotate { image, preview, json } => annotate(image, preview, json),
        Command::Fuse {
            config,
            first,
            second,
            output,
            order,
            debug_out,
            verbose,
        } => {
            let file_settings = match config {
                Some(path) => FuseSettings::load(&path)?,
                None => FuseSettings::default(),
            };
            let config = file_settings
                .merge(FuseSettings {
                    first_dir: first,
                    second_dir: second,
                    output_dir: output,
                    order,
                })
                .resolve()?;

            if verbose {
                println!("Fusing {:?} + {:?} into {:?}", config.first_dir, config.second_dir, config.output_dir);
            }

            let mut fuser = Fuser::new(config).with_verbose(verbose);
            if let Some(debug_dir) = debug_out {
                fuser = fuser.with_debug(debug_dir)?;
            }
            let report = fuser.run()?;

            if verbose {
                println!("\n=== Fusion Results ===");
                println!("Pairs fused: {}", report.outputs.len());
            }
            Ok(())
        }
    }
}

#[cfg(feature = "gui")]
fn annotate(image: Option<PathBuf>, preview: Option<PathBuf>, json: Option<PathBuf>) -> anyhow::Result<()> {
    digitkit::gui::run(digitkit::gui::AnnotatorOptions { image, preview, json })
}

#[cfg(not(feature = "gui"))]
fn annotate(_image: Option<PathBuf>, _preview: Option<PathBuf>, _json: Option<PathBuf>) -> anyhow::Result<()> {
    anyhow::bail!("digitkit was built without the `gui` feature; the annotator is unavailable")
}
