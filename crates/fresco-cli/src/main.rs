//! fresco CLI - render hidden-line sketches for pen plotters.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fresco::{render_sketch, write_json, RenderSettings, Sketch, SvgDocument};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fresco")]
#[command(about = "Render hidden-line 3D sketches as plotter-ready SVG", long_about = None)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available sketches
    List,
    /// Render a sketch to a file
    Render {
        /// Sketch name (see `fresco list`)
        sketch: String,
        /// Output file (format determined by extension: .svg, .json)
        #[arg(short, long, default_value = "out.svg")]
        output: PathBuf,
        /// TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output width in pixels
        #[arg(long)]
        width: Option<f64>,
        /// Output height in pixels
        #[arg(long)]
        height: Option<f64>,
        /// Subdivision step for visibility sampling
        #[arg(long)]
        step: Option<f64>,
        /// Random seed for the sketch
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Command-line values that take precedence over the settings file.
struct Overrides {
    width: Option<f64>,
    height: Option<f64>,
    step: Option<f64>,
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List => list_sketches(),
        Commands::Render {
            sketch,
            output,
            config,
            width,
            height,
            step,
            seed,
        } => {
            let overrides = Overrides {
                width,
                height,
                step,
                seed,
            };
            render(&sketch, &output, config.as_deref(), overrides)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_sketches() {
    for sketch in Sketch::ALL {
        println!("{:<14} {}", sketch.name(), sketch.description());
    }
}

fn load_settings(config: Option<&Path>, overrides: Overrides) -> Result<RenderSettings> {
    let mut settings = match config {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    if let Some(width) = overrides.width {
        settings.width = width;
    }
    if let Some(height) = overrides.height {
        settings.height = height;
    }
    if let Some(step) = overrides.step {
        settings.subdivision_step = step;
    }
    if let Some(seed) = overrides.seed {
        settings.seed = seed;
    }
    settings.validate()?;
    Ok(settings)
}

fn render(name: &str, output: &Path, config: Option<&Path>, overrides: Overrides) -> Result<()> {
    let sketch: Sketch = name.parse()?;
    let settings = load_settings(config, overrides)?;
    let paths = render_sketch(sketch, &settings)?;
    let viewport = settings.viewport()?;

    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "svg" => {
            let mut doc = SvgDocument::from_settings(&viewport, &settings);
            doc.add_paths(paths.iter().cloned());
            doc.export(output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        "json" => {
            write_json(output, &viewport, &paths)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        _ => {
            bail!("Unknown output format: {}", ext);
        }
    }

    println!("Rendered {} ({} paths) to {}", sketch, paths.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> Overrides {
        Overrides {
            width: None,
            height: None,
            step: None,
            seed: None,
        }
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "fresco", "render", "sphere", "-o", "globe.json", "--seed", "3", "--step", "0.05", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                sketch,
                output,
                seed,
                step,
                config,
                ..
            } => {
                assert_eq!(sketch, "sphere");
                assert_eq!(output, PathBuf::from("globe.json"));
                assert_eq!(seed, Some(3));
                assert_eq!(step, Some(0.05));
                assert!(config.is_none());
            }
            Commands::List => panic!("expected render"),
        }
    }

    #[test]
    fn test_overrides_apply() {
        let settings = load_settings(
            None,
            Overrides {
                width: Some(320.0),
                seed: Some(11),
                ..no_overrides()
            },
        )
        .unwrap();
        assert_eq!(settings.width, 320.0);
        assert_eq!(settings.seed, 11);
        assert_eq!(settings.height, RenderSettings::default().height);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = load_settings(
            None,
            Overrides {
                step: Some(-1.0),
                ..no_overrides()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format() {
        let out = std::env::temp_dir().join("fresco-cli-test.png");
        let overrides = Overrides {
            width: Some(100.0),
            height: Some(100.0),
            step: Some(0.2),
            ..no_overrides()
        };
        let err = render("cube", &out, None, overrides).unwrap_err();
        assert!(err.to_string().contains("Unknown output format"));
    }
}
