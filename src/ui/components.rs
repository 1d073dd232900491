use crate::constants::TRASHINFO_DATE_FORMAT;
use crate::ui::app::{App, AppState};
use humansize::{BINARY, format_size};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::fmt::Write as _;

pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header_text = match app.locations.current() {
        Some(location) => {
            let count = app.entries.len();
            format!(
                "== {} == [{}/{}] | contains {count} {}",
                location.files_dir().display(),
                app.locations.position() + 1,
                app.locations.len(),
                if count == 1 { "file" } else { "files" }
            )
        }
        None => "No waste folders configured".to_string(),
    };

    let title = Paragraph::new(header_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

pub fn render_entries_list(f: &mut Frame, app: &mut App, area: Rect) {
    app.page_size = usize::from(area.height.saturating_sub(2).max(1));

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let checkbox = if app.marked.contains(&i) { "[x]" } else { "[ ]" };
            let content = format!(
                "{checkbox} {:<40} {}",
                entry.name.to_string_lossy(),
                entry.description()
            );
            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Trashed items"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

pub fn render_details(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(details) = app.highlighted_details() else {
        f.render_widget(
            Block::default().borders(Borders::ALL).title("Details"),
            area,
        );
        return;
    };

    let mut text = String::new();
    match &details.record {
        Ok(record) => {
            let _ = writeln!(text, "Original path:\n  {}", record.original_path.display());
            if let Some(date) = record.deletion_date {
                let _ = writeln!(text, "Deleted:\n  {}", date.format(TRASHINFO_DATE_FORMAT));
            }
        }
        Err(err) => {
            let _ = writeln!(text, "Unreadable metadata:\n  {err}");
        }
    }
    if let Some((size, files)) = details.contents {
        let _ = writeln!(
            text,
            "Contents:\n  {files} files, {}",
            format_size(size, BINARY)
        );
    }

    let details = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer_text = match app.state {
        AppState::Browsing => {
            "[Space] Select [Enter] Restore [</>] Switch waste folder [q] Quit".to_string()
        }
        AppState::Selecting => format!(
            "Selected: {} ({}) | [Space] Select [Enter] Restore [</>] Switch waste folder [q] Quit",
            app.marked.len(),
            format_size(app.total_selected_size(), BINARY)
        ),
        AppState::Confirmed => "Restoring...".to_string(),
        AppState::Quit => String::new(),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
