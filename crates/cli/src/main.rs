#![deny(unsafe_code)]
//! CLI binary for the particle field.
//!
//! Subcommands:
//! - `render`: run the field N frames headless, write PNG
//! - `replay <seed.json>`: render a saved seed
//! - `simulate`: run N frames and report link and bounds statistics
//! - `defaults`: print default params and their schema

mod error;

use clap::{ArgAction, Args, Parser, Subcommand};
use error::CliError;
use particle_field_core::{FieldConfig, Recorder, Rgb8, Seed, Surface};
use particle_field_raster::snapshot::write_png;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Particle field background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct FieldArgs {
    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = 720)]
    height: u32,

    /// Number of frames to advance.
    #[arg(short, long, default_value_t = 120)]
    frames: u64,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Field parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field headless and write the last frame as PNG.
    Render {
        #[command(flatten)]
        field: FieldArgs,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,

        /// Opaque background color (#rrggbb). Transparent if omitted.
        #[arg(long)]
        background: Option<String>,

        /// Also write the seed as JSON so the frame can be replayed.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// Render a seed previously written with `render --save-seed`.
    Replay {
        /// Seed JSON file.
        seed_file: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,

        /// Opaque background color (#rrggbb). Transparent if omitted.
        #[arg(long)]
        background: Option<String>,
    },
    /// Run the field and report statistics without drawing pixels.
    Simulate {
        #[command(flatten)]
        field: FieldArgs,

        /// Print every particle's final state.
        #[arg(long)]
        dump: bool,
    },
    /// Print default params and the param schema.
    Defaults,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_seed(args: &FieldArgs) -> Result<Seed, CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let mut seed = Seed::new(args.width, args.height, args.seed);
    seed.params = params;
    seed.frames = args.frames;
    seed.validate()?;
    Ok(seed)
}

fn parse_background(background: Option<&str>) -> Result<Option<Rgb8>, CliError> {
    background
        .map(|hex| Rgb8::from_hex(hex).map_err(|e| CliError::Input(format!("--background: {e}"))))
        .transpose()
}

fn render_to_png(
    seed: &Seed,
    background: Option<Rgb8>,
    output: &Path,
    json: bool,
) -> Result<(), CliError> {
    let surface = particle_field_raster::rasterize(seed, background)?;
    write_png(&surface, output)?;

    if json {
        let info = serde_json::json!({
            "width": seed.width,
            "height": seed.height,
            "frames": seed.frames,
            "seed": seed.seed,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {}x{} ({} frames, seed {}) -> {}",
            seed.width,
            seed.height,
            seed.frames,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            let info = serde_json::json!({
                "params": FieldConfig::default().to_json(),
                "schema": FieldConfig::param_schema(),
            });
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Params:");
                if let Some(map) = info["params"].as_object() {
                    for (key, value) in map {
                        println!("  {key} = {value}");
                    }
                }
            }
        }
        Command::Render {
            field,
            output,
            background,
            save_seed,
        } => {
            let seed = build_seed(&field)?;
            let background = parse_background(background.as_deref())?;
            if let Some(path) = save_seed {
                seed.save(&path)?;
            }
            render_to_png(&seed, background, &output, cli.json)?;
        }
        Command::Replay {
            seed_file,
            output,
            background,
        } => {
            let seed = Seed::load(&seed_file)?;
            let background = parse_background(background.as_deref())?;
            render_to_png(&seed, background, &output, cli.json)?;
        }
        Command::Simulate { field, dump } => {
            let seed = build_seed(&field)?;
            let recorder = Recorder::new(seed.viewport()?);
            let renderer = particle_field_raster::render_seed(&seed, recorder)?;
            let (Some(surface), Some(state)) = (renderer.surface(), renderer.field()) else {
                return Err(CliError::Io("renderer has no field".into()));
            };
            let viewport = surface.viewport();

            if cli.json {
                let mut info = serde_json::json!({
                    "width": viewport.width(),
                    "height": viewport.height(),
                    "frames": seed.frames,
                    "seed": seed.seed,
                    "particles": state.len(),
                    "links_last_frame": surface.line_count(),
                    "in_bounds": state.all_in_bounds(),
                });
                if dump {
                    info["state"] = serde_json::to_value(state.particles())?;
                }
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} particles, {} frames on {}x{}",
                    state.len(),
                    seed.frames,
                    viewport.width(),
                    viewport.height()
                );
                println!("links on last frame: {}", surface.line_count());
                println!("all in bounds: {}", state.all_in_bounds());
                if dump {
                    for (i, p) in state.particles().iter().enumerate() {
                        println!(
                            "  #{i:02} pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) size={:.3} opacity={:.3}",
                            p.position.x,
                            p.position.y,
                            p.velocity.x,
                            p.velocity.y,
                            p.size,
                            p.opacity
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
