use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use sl_app::{AppResult, SpectraLab};
use sl_pipeline::{ProcessingOptions, SmoothingOptions};
use sl_results::Metadata;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(about = "SpectraLab CLI - Spectrometer capture processing tool", long_about = None)]
struct Cli {
    /// Directory holding the named result history
    #[arg(long, default_value = "spectra_history", global = true)]
    history_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process three captures into corrected spectra
    Process {
        /// Path to the sample capture file
        sample: PathBuf,
        /// Path to the water (reference) capture file
        water: PathBuf,
        /// Path to the dark capture file
        dark: PathBuf,
        /// Skip the corrected-intensity curve
        #[arg(long)]
        no_corrected: bool,
        /// Skip the transmittance curve
        #[arg(long)]
        no_transmittance: bool,
        /// Skip the absorbance curve
        #[arg(long)]
        no_absorbance: bool,
        /// Apply Savitzky-Golay smoothing to the emitted curves
        #[arg(long)]
        smooth: bool,
        /// Smoothing window length (odd)
        #[arg(long, default_value_t = 11)]
        smooth_window: usize,
        /// Smoothing polynomial order
        #[arg(long, default_value_t = 3)]
        smooth_order: usize,
        /// Save the result into the history under this name
        #[arg(long)]
        save: Option<String>,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved results, most recent first
    History,
    /// Show one saved result as JSON
    Show {
        /// Saved result name
        name: String,
    },
    /// Export one saved result as CSV
    ExportCsv {
        /// Saved result name
        name: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export every saved result as a ZIP of CSV files
    ExportBatch {
        /// Output ZIP file path
        output: PathBuf,
    },
    /// Delete one saved result
    Delete {
        /// Saved result name
        name: String,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let lab = SpectraLab::new(cli.history_dir)?;

    match cli.command {
        Commands::Process {
            sample,
            water,
            dark,
            no_corrected,
            no_transmittance,
            no_absorbance,
            smooth,
            smooth_window,
            smooth_order,
            save,
            output,
        } => {
            let options = ProcessingOptions {
                emit_corrected: !no_corrected,
                emit_transmittance: !no_transmittance,
                emit_absorbance: !no_absorbance,
                smoothing: SmoothingOptions {
                    enabled: smooth,
                    window: smooth_window,
                    order: smooth_order,
                },
            };
            cmd_process(
                &lab,
                &sample,
                &water,
                &dark,
                &options,
                save.as_deref(),
                output.as_deref(),
            )
        }
        Commands::History => cmd_history(&lab),
        Commands::Show { name } => cmd_show(&lab, &name),
        Commands::ExportCsv { name, output } => cmd_export_csv(&lab, &name, output.as_deref()),
        Commands::ExportBatch { output } => cmd_export_batch(&lab, &output),
        Commands::Delete { name } => cmd_delete(&lab, &name),
    }
}

fn cmd_process(
    lab: &SpectraLab,
    sample_path: &Path,
    water_path: &Path,
    dark_path: &Path,
    options: &ProcessingOptions,
    save: Option<&str>,
    output: Option<&Path>,
) -> AppResult<()> {
    let sample = fs::read(sample_path)?;
    let water = fs::read(water_path)?;
    let dark = fs::read(dark_path)?;

    let flat = lab.process(&sample, &water, &dark, options)?;
    eprintln!(
        "✓ Processed {} sample(s) into {} curve(s)",
        flat.get("wavelength").map_or(0, Vec::len),
        flat.len().saturating_sub(1)
    );

    if let Some(name) = save {
        let mut metadata = Metadata::new();
        metadata.insert(
            "sample_file".to_string(),
            serde_json::json!(sample_path.display().to_string()),
        );
        let summary = lab.save(name, &flat, metadata)?;
        eprintln!("✓ Saved '{}' at {}", summary.name, summary.timestamp);
    }

    let json = serde_json::to_string_pretty(&flat).map_err(std::io::Error::other)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_history(lab: &SpectraLab) -> AppResult<()> {
    let history = lab.history()?;

    if history.is_empty() {
        println!("No saved results");
    } else {
        println!("Saved results:");
        for entry in history {
            println!("  {} ({})", entry.name, entry.timestamp);
        }
    }
    Ok(())
}

fn cmd_show(lab: &SpectraLab, name: &str) -> AppResult<()> {
    let (metadata, data) = lab.history_item(name)?;
    let payload = serde_json::json!({ "meta": metadata, "data": data });
    let json = serde_json::to_string_pretty(&payload).map_err(std::io::Error::other)?;
    println!("{}", json);
    Ok(())
}

fn cmd_export_csv(lab: &SpectraLab, name: &str, output: Option<&Path>) -> AppResult<()> {
    let bytes = lab.export_csv(name)?;

    match output {
        Some(path) => {
            fs::write(path, &bytes)?;
            eprintln!("✓ Exported '{}' to {}", name, path.display());
        }
        None => print!("{}", String::from_utf8_lossy(&bytes)),
    }
    Ok(())
}

fn cmd_export_batch(lab: &SpectraLab, output: &Path) -> AppResult<()> {
    let count = lab.history()?.len();
    let bytes = lab.export_batch()?;
    fs::write(output, &bytes)?;
    eprintln!("✓ Exported {} result(s) to {}", count, output.display());
    Ok(())
}

fn cmd_delete(lab: &SpectraLab, name: &str) -> AppResult<()> {
    lab.delete(name)?;
    println!("✓ Deleted '{}'", name);
    Ok(())
}
