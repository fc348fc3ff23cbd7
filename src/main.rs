use clap::{Parser, Subcommand};
use eyre::{Context, Result, eyre};
use std::io::{self, Write};
use std::path::PathBuf;
use taskzen::render::{render_dashboard, render_json};
use taskzen::{ErrorBoundary, Event, FilterCriterion, FilterView, Task, TaskContext, seed};
use tracing::info;

#[derive(Parser)]
#[command(name = "taskzen")]
#[command(about = "TaskZen - task list with filtered views")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Seed file (.yaml, .yml or .json); defaults to <config dir>/taskzen/seed.yaml when present
    #[arg(short, long, global = true)]
    seed: Option<PathBuf>,

    /// Initial filter criterion
    #[arg(short, long, global = true, value_enum, default_value_t = FilterCriterion::All)]
    filter: FilterCriterion,

    /// Print the visible tasks as JSON instead of the dashboard
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for the seed
    Show,

    /// Apply events in order, then render
    Replay {
        /// Events: toggle:<id>, filter:<all|active|completed>, add:<title> or add-id:<id>=<title>
        #[arg(required = true)]
        events: Vec<String>,

        /// Render after every event instead of only at the end (not available with --json)
        #[arg(long)]
        each: bool,
    },
}

impl Cli {
    /// Reject flag combinations clap cannot express across global args
    fn validate(&self) -> Result<()> {
        if self.json && matches!(self.command, Commands::Replay { each: true, .. }) {
            return Err(eyre!("--each cannot be combined with --json"));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    cli.validate()?;

    let store = seed::open_store(cli.seed.as_deref())?;

    let mut ctx = TaskContext::builder()
        .store(store)
        .filter(FilterView::new(cli.filter))
        .build()?;

    ctx.store_mut().subscribe(|tasks: &[Task]| {
        let done = tasks.iter().filter(|t| t.completed).count();
        info!(total = tasks.len(), done, "Tasks changed");
    });
    ctx.filter_mut().subscribe(|criterion: &FilterCriterion| {
        info!(%criterion, "Filter changed");
    });

    let mut boundary = ErrorBoundary::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Show => {
            render(&ctx, &mut boundary, cli.json, &mut out)?;
        }
        Commands::Replay { events, each } => {
            let events = events
                .iter()
                .map(|raw| raw.parse::<Event>())
                .collect::<Result<Vec<_>>>()?;

            for event in events {
                let label = event.to_string();
                ctx.dispatch(event).with_context(|| format!("Failed to apply {}", label))?;

                if each {
                    writeln!(out, "# {}", label)?;
                    render(&ctx, &mut boundary, cli.json, &mut out)?;
                    writeln!(out)?;
                }
            }

            if !each {
                render(&ctx, &mut boundary, cli.json, &mut out)?;
            }
        }
    }

    Ok(())
}

fn render<W: Write>(ctx: &TaskContext, boundary: &mut ErrorBoundary, json: bool, out: &mut W) -> Result<()> {
    if json {
        return render_json(ctx, out);
    }
    boundary.render(out, |buf| render_dashboard(ctx, buf))
}
