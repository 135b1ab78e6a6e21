//! Main event loop.

use std::time::Instant;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::{debug, error, trace};
use tokio::time::sleep_until;

use crate::app::App;
use crate::error::AppError;
use crate::render;
use crate::terminal::TerminalGuard;

/// Sleep until the deadline, or forever without one.
/// This is used as a conditional branch in tokio::select!
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

/// Run until the user quits or the terminal closes the event stream.
///
/// Failures while handling an event (e.g. a property store write) are shown
/// in the status line; terminal I/O failures end the loop.
pub async fn run(app: &mut App, terminal: &mut TerminalGuard) -> Result<(), AppError> {
    let mut events = EventStream::new();
    let hits = render::draw(terminal.stdout(), app)?;
    app.set_hits(hits);

    while !app.should_quit() {
        let deadline = app.next_deadline();

        let outcome = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    trace!("Crossterm event: {:?}", event);
                    app.handle_event(event, Instant::now())
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("Event stream closed");
                    break;
                }
            },
            _ = sleep_until_optional(deadline) => {
                trace!("Deadline reached");
                app.tick(Instant::now())
            }
        };

        if let Err(e) = outcome {
            error!("{}", e);
            app.set_status(e.to_string());
        }

        let hits = render::draw(terminal.stdout(), app)?;
        app.set_hits(hits);
    }

    Ok(())
}
