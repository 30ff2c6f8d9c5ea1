//! Task list rendering.

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use taskdeck_proto::task::Task;

use super::theme::{self, Palette};
use crate::app::App;

/// Render the (filtered) task list with the cursor row highlighted.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, today: NaiveDate) {
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let under_cursor = index == app.cursor;
            ListItem::new(task_line(app, task, palette, today, under_cursor))
        })
        .collect();

    let title = if app.ui.filters.is_active() {
        format!("Tasks ({} of {})", visible.len(), app.cache.len())
    } else {
        format!("Tasks ({})", app.cache.len())
    };

    let block = Block::default()
        .title(Span::styled(title, palette.bold()))
        .borders(Borders::ALL)
        .border_style(palette.normal());

    frame.render_widget(List::new(items).block(block), area);
}

fn task_line<'a>(
    app: &App,
    task: &'a Task,
    palette: &Palette,
    today: NaiveDate,
    under_cursor: bool,
) -> Line<'a> {
    let base = if under_cursor {
        palette.selected()
    } else if task.completed {
        palette.dimmed()
    } else {
        palette.normal()
    };

    let mut spans = Vec::new();

    if app.ui.selecting {
        let mark = if app.ui.is_selected(task.id) {
            "[x] "
        } else {
            "[ ] "
        };
        spans.push(Span::styled(mark, base));
    }

    let checkbox = if task.completed { "[✓] " } else { "[ ] " };
    spans.push(Span::styled(checkbox, base));

    spans.push(Span::styled(
        "! ",
        base.fg(theme::priority_color(task.priority)),
    ));
    spans.push(Span::styled(task.title.as_str(), base));
    spans.push(Span::styled(
        format!(" #{}", task.category),
        base.fg(theme::category_color(task.category)),
    ));

    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!(" due {}", due.format("%Y-%m-%d")),
            if under_cursor { base } else { palette.dimmed() },
        ));
        if task.is_overdue(today) {
            spans.push(Span::styled(" overdue", palette.overdue()));
        }
    }

    Line::from(spans)
}
