//! Terminal UI rendering.

pub mod modal;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use theme::Palette;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App, today: NaiveDate) {
    let palette = Palette::for_theme(app.ui.theme);

    // Filter bar on top, task list in the middle, status bar at bottom.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_filter_bar(frame, chunks[0], app, &palette);
    task_list::render(frame, chunks[1], app, &palette, today);
    status_bar::render(frame, chunks[2], app, &palette);

    // Modal last so it sits on top.
    modal::render(frame, chunks[1], app, &palette);
}

/// One-line filter summary: search query plus active priority/category.
fn render_filter_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let filters = &app.ui.filters;

    let mut spans = vec![
        Span::styled("Search: ", palette.dimmed()),
        Span::styled(filters.query.clone(), palette.normal()),
    ];

    if let Some(priority) = filters.priority {
        spans.push(Span::styled(
            format!("  [priority: {priority}]"),
            palette.bold().fg(theme::priority_color(priority)),
        ));
    }
    if let Some(category) = filters.category {
        spans.push(Span::styled(
            format!("  [category: {category}]"),
            palette.bold().fg(theme::category_color(category)),
        ));
    }
    if filters.is_active() {
        spans.push(Span::styled("  (reorder disabled)", palette.dimmed()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.status_bar()),
        area,
    );
}
