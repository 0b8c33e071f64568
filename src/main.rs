//! tmux-switcher - Interactive tmux session menu
//!
//! Run with `tmux-switcher` or `tmux-switcher --help` for usage.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tmux_switcher::{
    config::{Config, ProjectRoots, PROJECTS_TEMPLATE},
    error::{Result, TmuxError},
    menu::{
        render_details, render_error, render_header, render_session_list, ColorChoice, Outcome,
        Selector, Theme,
    },
    picker::{FuzzyFinder, OpenOutcome, ProjectOpener},
    session::{inspect_session, list_sessions, summarize_sessions},
    tmux::{TmuxContext, TmuxExecutor},
    APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "List, inspect and switch between tmux sessions")]
#[command(long_about = None)]
struct Cli {
    /// Log tmux command lines and raw output
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a session from a numbered menu and switch to it (default)
    Switch,

    /// List all sessions
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the windows, panes and running programs of a session
    Inspect {
        /// Session name
        session: String,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Open a project directory as a session
    Open {
        /// Pick from a numbered list instead of the fuzzy finder
        #[arg(long)]
        no_finder: bool,

        /// Start a detached session for every project that has none
        #[arg(long, conflicts_with = "no_finder")]
        all: bool,
    },

    /// Show configuration
    Config {
        /// Initialize config and project roots files with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(verbose: bool, log_file: Option<&Path>) -> eyre::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        // Logs go to stderr so they never mix with the menu
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

async fn switch(config: &Config, theme: &Theme) -> Result<()> {
    let tmux = TmuxExecutor::from_config(config, TmuxContext::from_env());
    let snapshot = list_sessions(&tmux).await?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    let outcome = Selector::new(&tmux, theme)
        .with_max_attempts(config.prompt_attempts)
        .run(&snapshot, &mut input, &mut out)
        .await?;

    info!("Selector finished: {:?}", outcome);
    if outcome == Outcome::Quit {
        writeln!(out, "{}", theme.paint("Sessions remain active.", theme.success))?;
    }
    Ok(())
}

async fn list(config: &Config, theme: &Theme, json: bool) -> Result<()> {
    let tmux = TmuxExecutor::from_config(config, TmuxContext::from_env());
    let snapshot = list_sessions(&tmux).await?;
    let sessions = summarize_sessions(&tmux, &snapshot).await;
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &sessions).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render_header(&mut out, theme, "TMUX SESSIONS")?;
        render_session_list(&mut out, theme, &sessions)?;
    }
    Ok(())
}

async fn inspect(config: &Config, theme: &Theme, name: &str, json: bool) -> Result<()> {
    let tmux = TmuxExecutor::from_config(config, TmuxContext::from_env());
    let snapshot = list_sessions(&tmux).await?;
    let session = snapshot
        .find(name)
        .ok_or_else(|| TmuxError::SessionNotFound(name.to_string()))?;

    let details = inspect_session(&tmux, session).await?;
    let mut out = std::io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &details).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render_details(&mut out, theme, &details)?;
    }
    Ok(())
}

async fn open(config: &Config, theme: &Theme, no_finder: bool, all: bool) -> Result<()> {
    let projects_file = config.projects_file_path()?;
    let dirs = ProjectRoots::load(&projects_file)?.directories();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if dirs.is_empty() {
        writeln!(out, "No project directories found.")?;
        writeln!(
            out,
            "{}",
            theme.paint(
                format!("Add directories or globs to {}", projects_file.display()),
                theme.hint
            )
        )?;
        return Ok(());
    }

    let tmux = TmuxExecutor::from_config(config, TmuxContext::from_env());
    let opener = ProjectOpener::new(&tmux, theme)
        .with_layout(config.session_layout())
        .with_max_attempts(config.prompt_attempts);

    if all {
        let created = opener.start_missing(&dirs).await?;
        if created.is_empty() {
            writeln!(out, "Every project already has a session.")?;
        }
        for session in created {
            writeln!(
                out,
                "{}",
                theme.paint(format!("Started session '{session}'"), theme.success)
            )?;
        }
        return Ok(());
    }

    let choice = if no_finder {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        opener.choose_from_menu(&dirs, &mut input, &mut out)?
    } else {
        let finder = FuzzyFinder::from_config(config);
        finder.ensure_installed()?;
        opener.choose_with_finder(&finder, &dirs).await?
    };

    let Some(dir) = choice else {
        writeln!(out, "No selection.")?;
        return Ok(());
    };

    match opener.open(&dir).await? {
        OpenOutcome::Opened { session, created: true } => writeln!(
            out,
            "{}",
            theme.paint(
                format!("Opened new session '{session}' in {}", dir.display()),
                theme.success
            )
        )?,
        OpenOutcome::Opened { session, created: false } => {
            info!("Switched to existing session {}", session)
        }
        OpenOutcome::Cancelled => writeln!(out, "No selection.")?,
    }
    Ok(())
}

async fn show_config(config: &Config, config_path: &Path, init: bool) -> Result<()> {
    let projects_file = config.projects_file_path()?;

    if init {
        config.save_to(config_path)?;
        if !projects_file.exists() {
            if let Some(parent) = projects_file.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&projects_file, PROJECTS_TEMPLATE)?;
        }
        println!("Configuration initialized at {:?}", config_path);
        println!("Project roots: {:?}", projects_file);
    } else {
        println!("Configuration:");
        println!("{}", toml::to_string_pretty(config).map_err(|e| {
            tmux_switcher::error::ConfigError::SaveFailed(e.to_string())
        })?);
        println!("\nConfig file: {:?}", config_path);
        println!("Project roots: {:?}", projects_file);

        let tmux = TmuxExecutor::from_config(config, TmuxContext::from_env());
        match tmux.check_installed().await {
            Ok(version) => println!("Tmux: {}", version),
            Err(e) => println!("Tmux: {}", e),
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<ExitCode> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_file_path()?,
    };

    // Load configuration
    let config = Config::load_from(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    setup_logging(cli.verbose || config.debug, config.log_file.as_deref())?;
    info!("Starting {} v{}", APP_NAME, VERSION);

    let color = cli.color.unwrap_or(config.color);
    let theme = Theme::new(color.enabled(std::io::stdout().is_terminal()));

    let result = match cli.command {
        None | Some(Commands::Switch) => switch(&config, &theme).await,
        Some(Commands::List { json }) => list(&config, &theme, json).await,
        Some(Commands::Inspect { session, json }) => {
            inspect(&config, &theme, &session, json).await
        }
        Some(Commands::Open { no_finder, all }) => open(&config, &theme, no_finder, all).await,
        Some(Commands::Config { init }) => show_config(&config, &config_path, init).await,
    };

    let err_theme = Theme::new(color.enabled(std::io::stderr().is_terminal()));
    let code = exit_code(result, &mut std::io::stderr().lock(), &err_theme)?;
    Ok(ExitCode::from(code))
}

/// 0 on success or a clean quit; otherwise print the error and its hint, and return 1
fn exit_code<W: Write>(result: Result<()>, err_out: &mut W, theme: &Theme) -> std::io::Result<u8> {
    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            let hint = e.hint();
            render_error(err_out, theme, &e.to_string(), hint.as_deref())?;
            Ok(1)
        }
    }
}
