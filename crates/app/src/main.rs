mod script;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use harmonic_composer_core::{App, AppConfig, HarmonicSet, PlotBackend, Series};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::script::Step;

fn main() -> harmonic_composer_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { options } => run_show(&options),
        Commands::Script { steps, options } => run_script(&steps, &options),
        Commands::Export { output, options } => run_export(&output, &options),
    }
}

fn run_show(options: &AppOptions) -> harmonic_composer_core::Result<()> {
    let app = launch(options)?;
    print!("{}", app.render_text());
    write_figures(&app, options)
}

fn run_script(steps: &[String], options: &AppOptions) -> harmonic_composer_core::Result<()> {
    let steps = steps
        .iter()
        .map(|step| step.parse::<Step>())
        .collect::<harmonic_composer_core::Result<Vec<_>>>()?;

    let mut app = launch(options)?;
    for step in steps {
        step.apply(&mut app)?;
    }
    tracing::info!(passes = app.host().passes(), "script finished");
    print!("{}", app.render_text());
    write_figures(&app, options)
}

fn run_export(output: &Path, options: &AppOptions) -> harmonic_composer_core::Result<()> {
    let app = launch(options)?;
    let harmonics = app.harmonics().unwrap_or_default();
    let samples = app.config().composition.samples;
    tracing::info!(?output, harmonics = harmonics.len(), samples, "exporting waveforms");

    let composite = harmonics.composite(samples)?;
    let components: Vec<Series> = harmonics.components(samples).collect();
    let document = json!({
        "harmonics": harmonics,
        "samples": samples,
        "composite": composite,
        "components": components,
    });
    std::fs::write(output, serde_json::to_string_pretty(&document)?)?;
    write_figures(&app, options)
}

/// Writes `<title>.svg` for each figure when `--svg` was given.
fn write_figures(app: &App, options: &AppOptions) -> harmonic_composer_core::Result<()> {
    let Some(dir) = &options.svg else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)?;
    for (title, svg) in app.render_svg()? {
        let path = dir.join(format!("{title}.svg"));
        tracing::info!(?path, "writing figure");
        std::fs::write(&path, svg)?;
    }
    Ok(())
}

/// Builds the configuration from the optional file and flag overrides, then
/// starts the app.
fn launch(options: &AppOptions) -> harmonic_composer_core::Result<App> {
    let mut config = match &options.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    if let Some(harmonics) = &options.harmonics {
        config.composition.harmonics = harmonics.parse::<HarmonicSet>()?;
    }
    if let Some(samples) = options.samples {
        config.composition.samples = samples;
    }
    if let Some(backend) = options.backend {
        config.plot.backend = backend.into();
    }

    let mut app = App::new(config);
    app.start()?;
    Ok(app)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compose a waveform from editable harmonics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the composition once and print the figures and controls.
    Show {
        #[command(flatten)]
        options: AppOptions,
    },
    /// Apply UI events in order, then print the result.
    Script {
        /// Steps: `add`, `remove`, `mag:<i>:<v>` or `phase:<i>:<turns>`, with
        /// zero-based harmonic indices.
        #[arg(required = true)]
        steps: Vec<String>,
        #[command(flatten)]
        options: AppOptions,
    },
    /// Write the composite and component waveforms as JSON.
    Export {
        /// Destination of the JSON document.
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        options: AppOptions,
    },
}

#[derive(Args, Debug)]
struct AppOptions {
    /// Initial harmonics as `magnitude:phase,...` (phase in radians).
    #[arg(long)]
    harmonics: Option<String>,
    /// Samples per plotted waveform.
    #[arg(long)]
    samples: Option<usize>,
    /// How figures are described to the plot widgets.
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory receiving `composite.svg` and `components.svg`.
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Series,
    Function,
}

impl From<BackendArg> for PlotBackend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Series => PlotBackend::Series,
            BackendArg::Function => PlotBackend::Function,
        }
    }
}
