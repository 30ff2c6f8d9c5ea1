//! UI state: modal controller, multi-select mode, notices, and theme.
//!
//! At most one modal is open at a time; opening a new one discards the
//! previous one without running its action. Bulk-delete confirmations
//! capture their candidate id set when the confirmation is requested,
//! and that exact set is what gets deleted on confirm, even if the
//! cache changes underneath.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use taskdeck_proto::task::{Category, Priority, Task, TaskId};

use crate::filter::FilterState;

/// How long a transient notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Form backing the create and edit modals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: Category,
}

impl TaskForm {
    /// Pre-fill the form from an existing task, for the edit modal.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due_date: task.due_date.map(|dt| dt.date()),
            priority: task.priority,
            category: task.category,
        }
    }
}

/// Which tasks a bulk delete targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTarget {
    Completed,
    Overdue,
    All,
}

impl BulkTarget {
    /// Human label used in prompts and notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::All => "all",
        }
    }
}

/// The single open modal, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Create(TaskForm),
    Edit { id: TaskId, form: TaskForm },
    ConfirmDeleteOne { id: TaskId },
    ConfirmDeleteSelection { ids: Vec<TaskId> },
    ConfirmDeleteBulk { target: BulkTarget, ids: Vec<TaskId> },
}

/// Color theme, toggled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// A transient status-bar message with an expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

/// All client-local UI state.
#[derive(Debug)]
pub struct UiState {
    pub modal: ModalState,
    /// Whether multi-select mode is active.
    pub selecting: bool,
    /// Ids toggled while in multi-select mode.
    pub selected: Vec<TaskId>,
    pub filters: FilterState,
    pub theme: Theme,
    pub notice: Option<Notice>,
}

impl UiState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            modal: ModalState::Closed,
            selecting: false,
            selected: Vec::new(),
            filters: FilterState::default(),
            theme,
            notice: None,
        }
    }

    /// Open the create modal with a blank form.
    pub fn open_create(&mut self) {
        self.modal = ModalState::Create(TaskForm::default());
    }

    /// Open the edit modal pre-filled from `task`.
    pub fn open_edit(&mut self, task: &Task) {
        self.modal = ModalState::Edit {
            id: task.id,
            form: TaskForm::from_task(task),
        };
    }

    /// Ask for confirmation before deleting one task.
    pub fn request_delete_one(&mut self, id: TaskId) {
        self.modal = ModalState::ConfirmDeleteOne { id };
    }

    /// Ask for confirmation before deleting the current selection.
    /// Does nothing when the selection is empty.
    pub fn request_delete_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.modal = ModalState::ConfirmDeleteSelection {
            ids: self.selected.clone(),
        };
    }

    /// Ask for confirmation before a bulk delete, capturing the
    /// candidate ids now. An empty candidate set shows a notice
    /// instead of a confirmation.
    pub fn request_bulk_delete(
        &mut self,
        target: BulkTarget,
        tasks: &[Task],
        today: NaiveDate,
        now: Instant,
    ) {
        let ids: Vec<TaskId> = match target {
            BulkTarget::Completed => tasks.iter().filter(|t| t.completed).map(|t| t.id).collect(),
            BulkTarget::Overdue => tasks
                .iter()
                .filter(|t| t.is_overdue(today))
                .map(|t| t.id)
                .collect(),
            BulkTarget::All => tasks.iter().map(|t| t.id).collect(),
        };

        if ids.is_empty() {
            self.push_notice(format!("no {} tasks to delete", target.label()), now);
            return;
        }
        self.modal = ModalState::ConfirmDeleteBulk { target, ids };
    }

    /// Close whatever modal is open without acting on it.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Toggle multi-select mode. Both entering and leaving clear the
    /// selection, so a stale selection never survives a mode change.
    pub fn toggle_selection_mode(&mut self) {
        self.selecting = !self.selecting;
        self.selected.clear();
    }

    /// Toggle one task in or out of the selection.
    pub fn toggle_selected(&mut self, id: TaskId) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: TaskId) -> bool {
        self.selected.contains(&id)
    }

    /// Whether manual reordering is currently allowed. Disabled in
    /// multi-select mode and whenever a filter narrows the view.
    #[must_use]
    pub fn can_reorder(&self) -> bool {
        !self.selecting && !self.filters.is_active()
    }

    /// Show a transient notice in the status bar.
    pub fn push_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Drop the notice once its TTL has passed.
    pub fn tick_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
