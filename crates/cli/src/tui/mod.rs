pub mod input;
pub mod keys;
pub mod render;
pub mod viewport;
pub mod welcome;

use std::io::stdout;

use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use input::App;
use keys::Key;
use viewport::GridLayout;

/// Run the interactive editor until `/SQ`.
///
/// The terminal is restored on every exit path, including panics.
pub fn run(mut app: App, layout: GridLayout, show_welcome: bool) -> Result<App, String> {
    terminal::enable_raw_mode()
        .map_err(|e| format!("failed to enable raw mode: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(cursor::Show);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;
    terminal
        .hide_cursor()
        .map_err(|e| format!("failed to hide cursor: {}", e))?;

    if show_welcome {
        show_banner(&mut terminal)?;
    }

    loop {
        let size = terminal
            .size()
            .map_err(|e| format!("failed to query terminal size: {}", e))?;
        let window = layout.window(size);
        app.view.ensure_visible(window);

        terminal
            .draw(|frame| render::draw(frame, &layout, &app.view, &app.grid))
            .map_err(|e| format!("draw error: {}", e))?;

        // Resize and other events fall through to a redraw
        if let Event::Key(event) = event::read().map_err(|e| format!("event read error: {}", e))? {
            if let Some(key) = Key::from_crossterm(event) {
                app.handle_key(key, window);
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(app)
}

/// Draw the title screen and block until a key is pressed.
fn show_banner<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> Result<(), String> {
    loop {
        terminal
            .draw(welcome::draw)
            .map_err(|e| format!("draw error: {}", e))?;
        match event::read().map_err(|e| format!("event read error: {}", e))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            _ => {}
        }
    }
}
