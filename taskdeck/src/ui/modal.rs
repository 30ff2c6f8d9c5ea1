//! Modal overlay rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::Palette;
use crate::app::App;
use crate::state::{ModalState, TaskForm};

/// Render the open modal, if any, centered over the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let (title, lines) = match &app.ui.modal {
        ModalState::Closed => return,
        ModalState::Create(form) => ("New task", form_lines(form, palette)),
        ModalState::Edit { form, .. } => ("Edit task", form_lines(form, palette)),
        ModalState::ConfirmDeleteOne { id } => {
            let name = app
                .cache
                .get(*id)
                .map_or_else(|| "this task".to_string(), |t| format!("\"{}\"", t.title));
            (
                "Delete task",
                vec![Line::from(format!("Delete {name}? (y/n)"))],
            )
        }
        ModalState::ConfirmDeleteSelection { ids } => (
            "Delete selection",
            vec![Line::from(format!(
                "Delete {} selected task(s)? (y/n)",
                ids.len()
            ))],
        ),
        ModalState::ConfirmDeleteBulk { target, ids } => (
            "Bulk delete",
            vec![Line::from(format!(
                "Delete {} {} task(s)? (y/n)",
                ids.len(),
                target.label()
            ))],
        ),
    };

    #[allow(clippy::cast_possible_truncation)]
    let height = lines.len() as u16 + 2;
    let rect = centered_rect(area, 60, height);

    let block = Block::default()
        .title(Span::styled(title, palette.bold()))
        .borders(Borders::ALL)
        .border_style(palette.normal());

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).style(palette.normal()).block(block),
        rect,
    );
}

fn form_lines(form: &TaskForm, palette: &Palette) -> Vec<Line<'static>> {
    let due = form
        .due_date
        .map_or_else(|| "none".to_string(), |d| d.format("%Y-%m-%d").to_string());

    vec![
        Line::from(vec![
            Span::styled("Title:    ", palette.dimmed()),
            Span::styled(form.title.clone(), palette.normal()),
            Span::styled("_", palette.bold()),
        ]),
        Line::from(vec![
            Span::styled("Due:      ", palette.dimmed()),
            Span::raw(due),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", palette.dimmed()),
            Span::raw(form.priority.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Category: ", palette.dimmed()),
            Span::raw(form.category.to_string()),
        ]),
    ]
}

/// A rectangle of `percent_x` width and fixed `height`, centered in `area`.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
