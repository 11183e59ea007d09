use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use ppde::config::{Config, expand_tilde};
use ppde::event::{AppEvent, EventHandler, TICK_RATE};
use ppde::explorer_app::ExplorerApp;
use ppde::logging;
use ppde::quiz::question::{self, Question};
use ppde::quiz::session::QuizSession;
use ppde::quiz_app::QuizApp;
use ppde::ui::components::explorer_screen::ExplorerScreen;
use ppde::ui::components::quiz_screen::QuizScreen;
use ppde::ui::theme::Theme;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser)]
#[command(name = "ppde", version, about = "Terminal file explorer and timed quiz")]
struct Cli {
    #[arg(short, long, global = true, help = "Theme name")]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Timed multiple-choice quiz
    Quiz {
        #[arg(long, value_name = "SECS", help = "Seconds allowed per question")]
        time_limit: Option<u32>,

        #[arg(short, long, value_name = "FILE", help = "JSON question bank")]
        questions: Option<PathBuf>,

        #[arg(long, help = "Keep the question bank order")]
        no_shuffle: bool,
    },
    /// Browse, preview, create and delete files
    Explore {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    match logging::init(&config.log_level) {
        Ok(path) => tracing::debug!(path = %path.display(), "logging initialized"),
        Err(e) => eprintln!("warning: logging disabled: {e:#}"),
    }
    if let Some(e) = config_err {
        tracing::warn!(path = %Config::config_path().display(), error = %e, "config unreadable, using defaults");
    }

    let theme_name = cli.theme.unwrap_or_else(|| config.theme.clone());
    let theme = Theme::load(&theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = %theme_name, "unknown theme, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    match cli.command {
        Command::Quiz {
            time_limit,
            questions,
            no_shuffle,
        } => {
            // Bad question files fail before the terminal is touched
            let session = build_session(&config, time_limit, questions, no_shuffle)?;
            tracing::info!("starting quiz");
            let mut app = QuizApp::new(session, theme, Instant::now());
            with_terminal(|terminal, events| {
                let result = run_quiz(terminal, &mut app, events);
                app.shutdown();
                result
            })
        }
        Command::Explore { dir } => {
            let start = dir
                .map(|d| expand_tilde(&d.to_string_lossy()))
                .unwrap_or_else(|| config.start_directory());
            tracing::info!(dir = %start.display(), "starting explorer");
            let mut app = ExplorerApp::new(start, theme);
            with_terminal(|terminal, events| run_explorer(terminal, &mut app, events))
        }
    }
}

fn build_session(
    config: &Config,
    time_limit: Option<u32>,
    questions: Option<PathBuf>,
    no_shuffle: bool,
) -> Result<QuizSession> {
    let file = questions.or_else(|| config.question_file.as_deref().map(expand_tilde));
    let mut bank: Vec<Question> = match &file {
        Some(path) => question::load_from_file(path)?,
        None => question::load_bundled()?,
    };
    tracing::info!(
        source = %file.as_deref().map_or("bundled".into(), |p| p.display().to_string()),
        count = bank.len(),
        "question bank loaded"
    );

    if config.shuffle_questions && !no_shuffle {
        question::shuffle(&mut bank, &mut SmallRng::from_entropy());
    }
    let limit = time_limit.unwrap_or(config.time_per_question).max(1);
    QuizSession::new(bank, limit).context("invalid question bank")
}

/// Sets up raw mode and the alternate screen, runs `body`, then restores the
/// terminal whether or not `body` failed.
fn with_terminal<F>(body: F) -> Result<()>
where
    F: FnOnce(&mut Term, &EventHandler) -> Result<()>,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let events = EventHandler::new(TICK_RATE);

    let result = body(&mut terminal, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "exited with error");
    }
    result
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn run_quiz(terminal: &mut Term, app: &mut QuizApp, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| frame.render_widget(QuizScreen::new(app), frame.area()))?;

        match events.next()? {
            AppEvent::Key(key) if is_interrupt(&key) => app.quit(),
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            tracing::info!(score = app.session.score(), "quiz closed");
            return Ok(());
        }
    }
}

fn run_explorer(terminal: &mut Term, app: &mut ExplorerApp, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| frame.render_widget(ExplorerScreen::new(app), frame.area()))?;

        match events.next()? {
            AppEvent::Key(key) if is_interrupt(&key) => app.should_quit = true,
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            tracing::info!("explorer closed");
            return Ok(());
        }
    }
}
