use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use log::info;

use starpath::{
    chart::StarChart,
    config::{positive_duration, ChartConfig},
    loader::load_sources,
    render::{frame_export::export_frames, svg_canvas::SvgCanvas},
    starpath_errors::StarpathError,
};

#[derive(Parser)]
#[command(name = "starpath")]
#[command(about = "Star charts with constellation line art and animated planet tracks")]
#[command(version)]
struct Cli {
    /// Chart configuration (JSON); source paths are relative to its directory
    #[arg(short, long, default_value = "chart.json")]
    config: Utf8PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one SVG snapshot
    Render {
        /// Position in the animation cycle, 0 = first sample, 1 = last sample
        #[arg(short, long, default_value_t = 0.0)]
        ratio: f64,
        #[arg(short, long, default_value = "chart.svg")]
        output: Utf8PathBuf,
    },
    /// Render one cycle as numbered SVG snapshots
    Frames {
        #[arg(short = 'n', long, default_value_t = 60)]
        count: usize,
        #[arg(short, long, default_value = "frames")]
        output: Utf8PathBuf,
    },
    /// Run the live animation loop and log its progress
    Animate {
        /// Wall-clock seconds to run, one cycle when omitted
        #[arg(short, long)]
        seconds: Option<f64>,
        /// Resize the view to this width halfway through
        #[arg(short, long)]
        width: Option<f64>,
        /// Final snapshot written when the loop stops
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

async fn load_chart(config_path: &Utf8Path) -> Result<StarChart, StarpathError> {
    let config = ChartConfig::from_file(config_path)?;
    let base_dir = config_path.parent().unwrap_or(Utf8Path::new("."));
    let sources = load_sources(&config, base_dir).await?;
    StarChart::from_sources(config, &sources)
}

async fn animate(
    chart: &StarChart,
    seconds: Option<f64>,
    width: Option<f64>,
    output: Option<Utf8PathBuf>,
) -> Result<(), StarpathError> {
    let run_for = match seconds {
        Some(s) => positive_duration("animation length", s)?,
        None => chart.timing().cycle,
    };

    let view = chart.view_handle()?;
    let canvas = SvgCanvas::new(chart.view_size());
    let mut animation = chart.animation_loop(canvas, Some(&view));
    animation.start()?;

    tokio::time::sleep(run_for / 2).await;
    if let Some(width) = width {
        view.resize(width);
    }
    tokio::time::sleep(run_for - run_for / 2).await;

    animation.stop().await?;
    view.dispose();

    if let Some(sink) = animation.into_sink() {
        info!("{} cycles completed", sink.completed_cycles());
        if let Some(path) = output {
            std::fs::write(&path, sink.canvas().to_svg_string()?)?;
            info!("last frame written to {path}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), StarpathError> {
    env_logger::init();
    let cli = Cli::parse();
    let chart = load_chart(&cli.config).await?;

    match cli.command {
        Commands::Render { ratio, output } => {
            std::fs::write(&output, chart.snapshot_svg(ratio)?)?;
            info!("chart written to {output}");
        }
        Commands::Frames { count, output } => {
            export_frames(&chart, &output, count)?;
        }
        Commands::Animate {
            seconds,
            width,
            output,
        } => animate(&chart, seconds, width, output).await?,
    }
    Ok(())
}
