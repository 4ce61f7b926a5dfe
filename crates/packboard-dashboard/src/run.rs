//! Main run loop
//!
//! Binds the listener, then alternates between draining incoming frames
//! and polling the keyboard. Each loop pass draws at most once, no matter
//! how many messages a frame carried.

use packboard_core::{DashboardOptions, Result};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{app::App, event, event::AppEvent, server, terminal, ui};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Run the dashboard until the user quits
pub async fn run(options: DashboardOptions) -> Result<()> {
    let mut app = App::new(options);

    let listener = server::bind(&app.options.host, app.options.port).await?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(server::serve(listener, app.state.handshake(), tx));

    let mut terminal = terminal::init()?;
    let _guard = terminal::TerminalGuard::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Apply and ack everything that arrived since the last pass.
        while let Ok(batch) = rx.try_recv() {
            app.apply(&batch);
        }

        match event::poll_event(POLL_TIMEOUT)? {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    terminal::restore()?;
    Ok(())
}
