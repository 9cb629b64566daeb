//! Terminal Light-Up runner (default binary).
//!
//! Interactive mode draws the puzzle with crossterm and a framebuffer
//! renderer; `--headless` runs the JSON-lines adapter on stdio instead.

mod cli;

use std::io;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tui_lightup::adapter::LineServer;
use tui_lightup::core::{PuzzleSession, PuzzleSnapshot};
use tui_lightup::engine::next_hint;
use tui_lightup::input::{handle_key_event, should_quit, Cursor, InputAction};
use tui_lightup::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_lightup::types::SessionEvent;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    let config = cli.puzzle_config();

    init_logging(&cli)?;
    info!(
        seed,
        rotation = config.rotation_mode.as_str(),
        completion = config.completion.as_str(),
        headless = cli.headless,
        "starting tui-lightup"
    );

    let session = PuzzleSession::with_config(seed, config);

    if cli.headless {
        let mut server = LineServer::new(session);
        return server.serve(io::stdin().lock(), io::stdout().lock());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Stdout belongs to the renderer or the protocol, so logs go elsewhere.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if cli.headless {
        let _ = builder.with_writer(io::stderr).try_init();
    } else {
        let log_file = std::fs::File::create(&cli.log_file)?;
        let _ = builder
            .with_ansi(false)
            .with_writer(Arc::new(log_file))
            .try_init();
    }
    Ok(())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut session: PuzzleSession, seed: u32) -> Result<()> {
    let view = GameView::default();
    let mut cursor = Cursor::new();
    let mut snap = PuzzleSnapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        view.render_into_with_cursor(&snap, Some(cursor.tile_id()), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Block until the player does something; nothing changes on its own.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(InputAction::MoveCursor(dir)) => {
                        cursor.step(dir);
                    }
                    Some(InputAction::RotateSelected) => {
                        session.rotate(cursor.tile_id());
                    }
                    Some(InputAction::Reset) => {
                        session.reset();
                    }
                    Some(InputAction::Hint) => {
                        if let Some(id) = next_hint(&session) {
                            cursor.jump_to(id);
                        }
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = view.hit_test(viewport, mouse.column, mouse.row) {
                    cursor.jump_to(id);
                    session.rotate(id);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }

        if let Some(SessionEvent::Completed {
            episode_id,
            attempts,
        }) = session.take_last_event()
        {
            info!(seed, episode_id, attempts, "bulb lit");
        }
    }
}
