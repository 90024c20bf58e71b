//! Minimal terminal runtime for event-driven applications.
//!
//! The screen is redrawn only after an event changed the application state
//! or the terminal was resized.

use crossterm::event::{self, Event};
use ratatui::Frame;

/// Trait for TUI applications run by [`run`].
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event, returning whether the state changed.
    fn handle_event(&mut self, event: &Event) -> bool;

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);
}

/// Runs `app` until it asks to exit, restoring the terminal afterwards.
pub fn run<A>(app: &mut A) -> anyhow::Result<()>
where
    A: App,
{
    ratatui::run(|terminal| {
        let mut dirty = true;
        while !app.should_exit() {
            if dirty {
                terminal.draw(|f| app.draw(f))?;
            }
            let event = event::read()?;
            dirty = app.handle_event(&event) || matches!(event, Event::Resize(..));
        }
        Ok(())
    })
}
