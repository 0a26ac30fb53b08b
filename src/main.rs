use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use treetrace::export::{self, write_terminal};
use treetrace::{
    parse_level_order, AlgorithmRegistry, LayoutConfig, RenderOptions, TraceConfig,
};

#[derive(Parser, Debug)]
#[command(name = "treetrace", about = "Step-by-step traces of binary-tree algorithms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a traced algorithm and export its trace.
    Trace {
        /// Algorithm to run (see `treetrace list`).
        #[arg(long, default_value = "max-path-sum")]
        problem: String,
        /// Tree in level-order form.
        #[arg(long, default_value = "[-10,9,20,null,null,15,7]", allow_hyphen_values = true)]
        input: String,
        /// Write the JSON trace here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Disable ANSI styling in the terminal rendering.
        #[arg(long)]
        no_color: bool,
        /// Single-line JSON.
        #[arg(long)]
        compact: bool,
        /// Horizontal distance between in-order columns.
        #[arg(long, default_value_t = 100.0)]
        x_unit: f64,
        /// Vertical distance between depths.
        #[arg(long, default_value_t = 80.0)]
        y_spacing: f64,
    },
    /// List available algorithms.
    List,
    /// Validate a saved trace and print its terminal rendering.
    Replay {
        /// Trace JSON file.
        file: PathBuf,
        /// Disable ANSI styling.
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> Result<()> {
    // WARN applies only when RUST_LOG is unset
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let registry = AlgorithmRegistry::builtin();

    match cli.command {
        Commands::Trace {
            problem,
            input,
            out,
            no_color,
            compact,
            x_unit,
            y_spacing,
        } => {
            let layout = LayoutConfig::default()
                .with_horizontal_unit(x_unit)
                .with_vertical_spacing(y_spacing);
            let config = TraceConfig::default().with_layout(layout);
            let options = render_options(no_color);
            run_trace(&registry, &problem, &input, out, options, compact, &config)?
        }
        Commands::List => run_list(&registry),
        Commands::Replay { file, no_color } => run_replay(file, render_options(no_color))?,
    }

    Ok(())
}

fn render_options(no_color: bool) -> RenderOptions {
    if no_color {
        RenderOptions::plain()
    } else {
        RenderOptions::default()
    }
}

fn run_trace(
    registry: &AlgorithmRegistry,
    problem: &str,
    input: &str,
    out: Option<PathBuf>,
    options: RenderOptions,
    compact: bool,
    config: &TraceConfig,
) -> Result<()> {
    let algorithm = registry.get(problem).ok_or_else(|| {
        anyhow!(
            "unknown problem '{}'; available problems: {}",
            problem,
            registry.names().join(", ")
        )
    })?;

    let tree_input = parse_level_order(input);
    let trace = algorithm
        .trace(&tree_input, config)
        .with_context(|| format!("tracing {} failed", problem))?;
    info!(problem, steps = trace.steps.len(), "trace recorded");

    let encoded = if compact {
        export::to_json_compact(&trace)
    } else {
        export::to_json(&trace)
    };
    let json = encoded.context("failed to encode trace")?;

    match out {
        Some(path) => {
            let mut stdout = io::stdout().lock();
            write_terminal(&mut stdout, &trace, &options)
                .context("failed to print terminal trace")?;
            export::write_document(&json, &path)
                .with_context(|| format!("failed to write trace to {}", path.display()))?;
            eprintln!("Trace written to {}", path.display());
        }
        None => {
            let mut stderr = io::stderr().lock();
            write_terminal(&mut stderr, &trace, &options)
                .context("failed to print terminal trace")?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).context("failed to print trace JSON")?;
        }
    }

    Ok(())
}

fn run_list(registry: &AlgorithmRegistry) {
    for info in registry.list() {
        println!("{}\t{}\t{}", info.name, info.algorithm, info.description);
    }
}

fn run_replay(path: PathBuf, options: RenderOptions) -> Result<()> {
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read trace from {}", path.display()))?;
    let trace = export::from_json(&contents)
        .with_context(|| format!("failed to decode trace in {}", path.display()))?;
    trace
        .validate()
        .with_context(|| format!("trace in {} is inconsistent", path.display()))?;

    let mut stdout = io::stdout().lock();
    write_terminal(&mut stdout, &trace, &options).context("failed to print terminal trace")?;
    Ok(())
}
