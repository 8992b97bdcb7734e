use anyhow::Context;
use clap::{Parser, Subcommand};
use hand_sampler::commands::{classify, compare, spread};
use hand_sampler::config::Config;
use hand_sampler::device::load_recording;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hand-sampler", about = "Stable hand sampling from recorded hand-tracking frames")]
struct Cli {
    /// JSON config file (defaults apply to anything it leaves out)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the moving/still classification of every frame
    Classify {
        recording: PathBuf,
    },

    /// Print the spread between the outermost fingertips of every frame
    Spread {
        recording: PathBuf,
    },

    /// Capture a control and a test hand and print their finger-count difference
    Compare {
        #[arg(long)]
        control: PathBuf,

        #[arg(long)]
        test: PathBuf,

        /// Stream the recordings and capture on Enter instead of at the end
        #[arg(long)]
        interactive: bool,

        /// Write the full comparison report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("Loading {}", path.display())),
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    hand_sampler::init_tracing();

    info!("hand-sampler v{} starting", env!("CARGO_PKG_VERSION"));
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Classify { recording } => {
            let frames = load_recording(&recording)?;
            let summary = classify::classify_recording(&config, &frames);

            for frame in &summary.frames {
                match frame.reading {
                    Some(r) => println!(
                        "frame {:>6}  velocity {:>8.3}  turn {:>7.3}  {}{}",
                        frame.frame_id,
                        r.avg_velocity,
                        r.avg_turn,
                        if r.moving { "moving" } else { "still" },
                        if frame.viable { "  viable" } else { "" }
                    ),
                    None => println!("frame {:>6}  no hand", frame.frame_id),
                }
            }
            println!(
                "{} frames, {} moving, {} viable",
                summary.frames.len(),
                summary.moving_frames,
                summary.viable_frames
            );
        }

        Command::Spread { recording } => {
            let frames = load_recording(&recording)?;
            let summary = spread::measure_spread(&config, &frames);

            for (frame_id, spread) in &summary.frames {
                match spread {
                    Some(s) => println!("frame {:>6}  spread {:>8.2}", frame_id, s),
                    None => println!("frame {:>6}  -", frame_id),
                }
            }
            match summary.max_spread {
                Some(max) => println!("max spread {:.2} over {} frames", max, summary.frames_measured),
                None => println!("no frame had two or more fingers"),
            }
        }

        Command::Compare {
            control,
            test,
            interactive,
            output,
        } => {
            let control_frames = load_recording(&control)?;
            let test_frames = load_recording(&test)?;

            let report = if interactive {
                let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
                compare::compare_interactive(&config, control_frames, test_frames, &mut stdin).await?
            } else {
                compare::compare_offline(&config, &control_frames, &test_frames)?
            };

            if let Some(path) = output {
                compare::write_report(&path, &report)?;
            }
            println!("{}", report.finger_count_difference);
        }
    }

    Ok(())
}
