//! `scenario`: terminal client for the CSA scenario generator.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use typewriter::actor::{App, AppConfig};
use typewriter::logging::{self, LogTarget};
use typewriter::scenario::RANDOM_LABEL;
use typewriter::terminal::StyledWriterSink;
use typewriter::view::{alert_message, export_to, DEFAULT_MODULE_LABEL};
use typewriter::{Config, Module, ModuleSelection, RevealEngine, ScenarioClient, ScenarioView};

#[derive(Parser)]
#[command(name = "scenario")]
#[command(version)]
#[command(about = "Generate and read CSA practice scenarios in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ./scenario.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the generator backend
    #[arg(long, global = true, env = "SCENARIO_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Milliseconds between revealed characters
    #[arg(long, global = true, value_name = "N")]
    interval_ms: Option<u64>,

    /// Type markup out literally instead of revealing it atomically
    #[arg(long, global = true)]
    plain: bool,

    /// Show only the generic failure alert
    #[arg(long, global = true)]
    no_error_detail: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Generate one scenario and print it
    Generate {
        /// Module name, or "Random"
        #[arg(value_name = "MODULE")]
        module: String,

        /// Also write the scenario as Markdown to PATH
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Print the problem statement at once
        #[arg(long)]
        no_animate: bool,
    },
    /// List the module catalog
    Modules,
    /// Check that the backend is up
    Health,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Tui);

    let target = match &command {
        Commands::Tui => LogTarget::default_file(),
        _ => LogTarget::Stderr,
    };
    let _guard = logging::init(&target);

    let config = load_config(&cli)?;

    match command {
        Commands::Tui => tui(&config),
        Commands::Generate {
            module,
            export,
            no_animate,
        } => generate(&config, &module, export.as_deref(), no_animate),
        Commands::Modules => {
            modules();
            Ok(())
        }
        Commands::Health => health(&config),
    }
}

/// Defaults, then the config file, then flags and environment.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref()).context("load config")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.interval_ms = interval_ms;
    }
    if cli.plain {
        config.preserve_markup = false;
    }
    if cli.no_error_detail {
        config.include_error_detail = false;
    }
    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")
}

fn tui(config: &Config) -> Result<()> {
    let client = ScenarioClient::from_config(config).context("create http client")?;
    let app_config = AppConfig {
        export_dir: std::env::current_dir().context("resolve working directory")?,
        ..AppConfig::default()
    };
    App::new(config, client, app_config).run()?;
    Ok(())
}

fn generate(config: &Config, module: &str, export: Option<&std::path::Path>, no_animate: bool) -> Result<()> {
    let module = ModuleSelection::parse(module)?.resolve(&mut rand::rng());
    let client = ScenarioClient::from_config(config).context("create http client")?;
    let response = match runtime()?.block_on(client.generate(module)) {
        Ok(response) => response,
        Err(error) => bail!("{}", alert_message(&error, config.include_error_detail)),
    };

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let sink = Arc::new(Mutex::new(StyledWriterSink::new(stdout, config.preserve_markup, styled)));
    let interval = if no_animate {
        std::time::Duration::ZERO
    } else {
        config.interval()
    };

    let label = response
        .module_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_MODULE_LABEL);
    println!("{label}\n");

    let engine = RevealEngine::new(config.reveal_options());
    let mut view = ScenarioView::new(sink, interval);
    view.populate(&response, &engine).wait(None);

    let mut out = io::stdout().lock();
    writeln!(out, "\n\nPro Tips\n  {}", view.tips_label())?;
    print_list(&mut out, "Hints", view.hints(), false)?;
    print_list(&mut out, "Guided Steps", view.steps(), true)?;
    print_list(&mut out, "Theoretical References", view.references(), false)?;
    out.flush()?;

    if let Some(path) = export {
        export_to(&view, path, config.preserve_markup)
            .with_context(|| format!("export to {}", path.display()))?;
        writeln!(out, "\nExported to {}", path.display())?;
    }
    Ok(())
}

fn print_list(out: &mut impl Write, title: &str, items: &[String], numbered: bool) -> io::Result<()> {
    writeln!(out, "\n{title}")?;
    for (i, item) in items.iter().enumerate() {
        if numbered {
            writeln!(out, "  {}. {item}", i + 1)?;
        } else {
            writeln!(out, "  - {item}")?;
        }
    }
    Ok(())
}

fn modules() {
    for (i, module) in Module::ALL.iter().enumerate() {
        println!("{}. {module}", i + 1);
    }
    println!("{}. {RANDOM_LABEL}", Module::ALL.len() + 1);
}

fn health(config: &Config) -> Result<()> {
    let client = ScenarioClient::from_config(config).context("create http client")?;
    let status = runtime()?
        .block_on(client.health())
        .with_context(|| format!("query {}", client.base_url()))?;
    println!("{} ({})", status.status, status.service);
    Ok(())
}
