use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rental_terms::{
    app::{handle_event, App},
    config::{default_log_path, Args},
    preferences::Preferences,
    quote::Quote,
    theme::{TerminalScheme, ThemeResolver},
    ui::ui,
};

const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args = Args::parse();
    let (rent, deposit_weeks) = args.initial_inputs()?;

    if args.summary {
        let quote = Quote::new(&rent, deposit_weeks);
        if args.json {
            println!("{}", quote.to_json()?);
        } else {
            println!("{}", quote.to_text());
        }
        return Ok(());
    }

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(err) = init_tracing(&log_path) {
        eprintln!("logging disabled: {:#}", err);
    }

    let preferences = Preferences::open(args.preferences.clone()).unwrap_or_else(|err| {
        warn!(error = %err, "preferences unavailable; theme choice will not be saved");
        Preferences::ephemeral()
    });
    let theme = ThemeResolver::new(preferences, Box::new(TerminalScheme::from_env()))
        .with_session_override(args.theme);
    info!(mode = ?theme.active(), "starting");

    let app = App::new(rent, deposit_weeks, theme);

    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if app.should_quit {
            info!("exiting");
            return Ok(());
        }

        if event::poll(TICK)? {
            handle_event(&mut app, event::read()?, Instant::now());
        }
        app.tick(Instant::now());
    }
}
