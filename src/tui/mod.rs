// src/tui/mod.rs
//! Terminal front end: the four step wizard over the backend API.
//!
//! One tokio task owns the terminal and the [`App`]. Input events,
//! finished backend calls and a spinner tick are multiplexed with
//! `select!`; backend calls themselves run on spawned tasks and report
//! back over an unbounded channel.

pub mod app;
pub mod complete;
pub mod input;
pub mod matcher;
pub mod polish;
pub mod upload;
pub mod widgets;

pub use app::App;

use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, EventStream};
use crossterm::execute;
use futures::StreamExt;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::Config;

const TICK: Duration = Duration::from_millis(120);

/// Run the wizard until the user quits. Takes over the terminal.
pub async fn run(config: Config) -> Result<()> {
    let mut terminal = ratatui::init();
    // Job descriptions get pasted; without this they arrive as a key storm.
    let _ = execute!(io::stdout(), EnableBracketedPaste);

    let result = run_loop(&mut terminal, config).await;

    let _ = execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}

async fn run_loop(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(config);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    info!("Wizard started");
    while !app.should_quit() {
        terminal.draw(|f| app.render(f))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(event, &tx),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(message) = rx.recv() => app.handle_outcome(message),
            _ = ticker.tick() => app.on_tick(),
        }
    }
    info!("Wizard closed");
    Ok(())
}
