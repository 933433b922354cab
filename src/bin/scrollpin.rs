use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "scrollpin", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized snap table.
    Table(PageArgs),
    /// Resolve a scroll fraction to its snap target.
    Resolve(ResolveArgs),
    /// Print every panel element's visual state at a scroll position.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll fraction in [0, 1].
    #[arg(long)]
    fraction: f64,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll position in pixels.
    #[arg(long)]
    scroll: f64,

    /// Let scrolling settle (snap included) before probing.
    #[arg(long, default_value_t = false)]
    settle: bool,
}

#[derive(serde::Serialize)]
struct TableRow<'a> {
    id: &'a str,
    pin: scrollpin::PinRange,
    normalized: Option<scrollpin::NormalizedRange>,
}

#[derive(serde::Serialize)]
struct PanelProbe<'a> {
    id: &'a str,
    state: scrollpin::PanelState,
    progress: Option<f64>,
    phase: Option<scrollpin::Phase>,
    elements: BTreeMap<String, scrollpin::VisualState>,
}

#[derive(serde::Serialize)]
struct Probe<'a> {
    scroll_y: f64,
    max_scroll: f64,
    active: Option<&'a str>,
    panels: Vec<PanelProbe<'a>>,
}

const FRAME_SECS: f64 = 1.0 / 60.0;
const SETTLE_LIMIT_SECS: f64 = 5.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Table(args) => cmd_table(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn mount(args: &PageArgs) -> anyhow::Result<scrollpin::PageSession<scrollpin::MemorySurface>> {
    let spec = scrollpin::PageSpec::from_path(&args.in_path)
        .with_context(|| format!("load page '{}'", args.in_path.display()))?;
    let viewport = scrollpin::ViewportSize::new(args.width, args.height)?;
    let session =
        scrollpin::PageSession::mount(spec, viewport, scrollpin::MemorySurface::for_section)
            .with_context(|| format!("mount page '{}'", args.in_path.display()))?;
    Ok(session)
}

fn cmd_table(args: PageArgs) -> anyhow::Result<()> {
    let session = mount(&args)?;
    let total = session.coordinator().total();
    let rows: Vec<TableRow<'_>> = session
        .panels()
        .iter()
        .filter_map(|p| {
            let pin = p.pin_range()?;
            let normalized =
                (total > 0.0).then(|| scrollpin::NormalizedRange::from_pin(pin, total));
            Some(TableRow {
                id: p.id(),
                pin,
                normalized,
            })
        })
        .collect();
    let out = serde_json::json!({
        "max_scroll": total,
        "tolerance": session.coordinator().config().tolerance,
        "ranges": rows,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let session = mount(&args.page)?;
    let coordinator = session.coordinator();
    let region = coordinator.classify(args.fraction);
    let target = coordinator.resolve(args.fraction);
    let out = serde_json::json!({
        "fraction": args.fraction,
        "region": region,
        "target": target,
        "target_px": target * coordinator.total(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let mut session = mount(&args.page)?;
    session.on_user_scroll(args.scroll, 0.0);
    if args.settle {
        let mut now = 0.0;
        while now < SETTLE_LIMIT_SECS {
            now += FRAME_SECS;
            session.on_frame(now);
            let driver = session.driver();
            if !driver.settle_pending() && driver.snap_in_flight().is_none() {
                break;
            }
        }
    }

    let active = session
        .driver()
        .active()
        .and_then(|i| session.panels().get(i))
        .map(|p| p.id());
    let panels = session
        .panels()
        .iter()
        .map(|p| PanelProbe {
            id: p.id(),
            state: p.state(),
            progress: p.progress().map(|x| x.value()),
            phase: p.progress().map(|x| x.phase()),
            elements: p
                .surface()
                .states()
                .iter()
                .map(|(el, st)| (el.to_string(), *st))
                .collect(),
        })
        .collect();
    let probe = Probe {
        scroll_y: session.scroll_y(),
        max_scroll: session.layout().max_scroll,
        active,
        panels,
    };
    println!("{}", serde_json::to_string_pretty(&probe)?);
    Ok(())
}
