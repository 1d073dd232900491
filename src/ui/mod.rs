pub mod app;
pub mod components;

use crate::model::TrashLocations;
use crate::restore::{Restorer, is_failure, warn_restore};
use crate::ui::app::{App, AppState};
use crate::ui::components::{render_details, render_entries_list, render_footer, render_header};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_entries_list(f, app, main_chunks[0]);
    render_details(f, app, main_chunks[1]);

    render_footer(f, app, chunks[2]);
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stderr>>,
    app: &mut App,
) -> Result<()> {
    while !app.is_finished() {
        terminal.draw(|f| ui(f, app))?;

        // Blocks until the next key; nothing else updates the screen.
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code)?;
        }
    }
    Ok(())
}

/// Runs the picker, then restores whatever was confirmed.
///
/// Returns the number of selected items that failed to restore.
pub fn select_and_restore(locations: TrashLocations, restorer: &Restorer<'_>) -> Result<usize> {
    let mut app = App::new(locations)?;

    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;

    if app.state != AppState::Confirmed {
        return Ok(0);
    }

    let mut failures = 0;
    for path in app.selected_paths() {
        let result = restorer.restore(&path);
        warn_restore(&result);
        if is_failure(&result) {
            failures += 1;
        }
    }
    Ok(failures)
}
