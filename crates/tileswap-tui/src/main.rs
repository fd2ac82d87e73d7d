mod app;
mod cli;
mod logging;
mod render;
mod theme;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::Args;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{error, info};

fn main() -> Result<()> {
    let args = Args::parse();
    let session = args.build_session()?;

    if args.print_state {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("failed to serialize session state")?;
        println!("{json}");
        return Ok(());
    }

    logging::init_tracing();
    info!(
        turns = session.max_turns(),
        size = session.grid().rows(),
        "starting tileswap"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let mut app = App::new(session, args.theme);
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(ref e) = result {
        error!(error = %e, "terminal loop failed");
    }
    result.context("terminal error")
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Tick message timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    info!(
        state = %app.session.state(),
        turns = app.session.turn_count(),
        "quitting"
    );
    Ok(())
}
