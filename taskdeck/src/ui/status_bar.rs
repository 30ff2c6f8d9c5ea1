//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use crate::app::App;
use crate::state::ModalState;

/// Render the status bar: session, progress, and either a transient
/// notice or key hints.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let done = app.cache.completed_count();
    let total = app.cache.len();
    let percent = app.cache.progress_percent();

    let right = if let Some(notice) = &app.ui.notice {
        Span::styled(notice.text.clone(), palette.bold().fg(palette.warning))
    } else {
        Span::styled(help_text(app), palette.dimmed())
    };

    let line = Line::from(vec![
        Span::styled(app.session.display_name().to_string(), palette.bold()),
        Span::raw(" | "),
        Span::raw(format!("{done}/{total} done ({percent}%)")),
        Span::raw(" | "),
        right,
    ]);

    frame.render_widget(Paragraph::new(line).style(palette.status_bar()), area);
}

fn help_text(app: &App) -> &'static str {
    match app.ui.modal {
        ModalState::Create(_) | ModalState::Edit { .. } => {
            "Enter: save | Esc: cancel | Tab: priority | S-Tab: category | +/-/0: due date"
        }
        ModalState::Closed if app.ui.selecting => {
            "Space: select | D: delete selected | v: leave select mode | q: quit"
        }
        ModalState::Closed => {
            "n: new | e: edit | Space: done | d: del | J/K: move | /: search | v: select | q: quit"
        }
        _ => "Enter/y: confirm | Esc/n: cancel",
    }
}
