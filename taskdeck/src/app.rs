//! Application state and event handling.
//!
//! [`App`] owns the session, the task cache, and all UI state. Key
//! events go in, optional [`ApiCommand`]s come out; the caller (the
//! main loop) forwards commands to the API worker and feeds
//! [`ApiEvent`]s back through [`App::apply_event`]. Keeping the whole
//! thing synchronous makes every transition unit-testable without a
//! terminal or a running service.

use std::time::Instant;

use chrono::{Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskdeck_proto::task::{Category, Priority, Task, due_date_at_noon};

use crate::cache::TaskCache;
use crate::net::{ApiCommand, ApiEvent};
use crate::reorder;
use crate::session::OwnerSession;
use crate::state::{BulkTarget, ModalState, TaskForm, Theme, UiState};

/// Where keystrokes are routed when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Search,
}

/// Top-level application state.
#[derive(Debug)]
pub struct App {
    pub session: OwnerSession,
    pub cache: TaskCache,
    pub ui: UiState,
    /// Cursor position within the visible (filtered) list.
    pub cursor: usize,
    focus: Focus,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(session: OwnerSession, theme: Theme) -> Self {
        Self {
            session,
            cache: TaskCache::new(),
            ui: UiState::new(theme),
            cursor: 0,
            focus: Focus::List,
            should_quit: false,
        }
    }

    /// The load command the main loop should issue on startup.
    #[must_use]
    pub fn initial_load(&self) -> ApiCommand {
        ApiCommand::Load {
            owner_id: self.session.owner_id().to_string(),
        }
    }

    /// Tasks passing the active filters, in cache order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.ui.filters.apply(self.cache.tasks())
    }

    /// Apply an event from the API worker.
    pub fn apply_event(&mut self, event: ApiEvent, now: Instant) {
        match event {
            ApiEvent::Loaded { owner_id, tasks } => {
                // A load issued before an owner switch can land after
                // it; drop anything not for the current owner.
                if owner_id != self.session.owner_id() {
                    tracing::debug!(%owner_id, "dropping stale load for previous owner");
                    return;
                }
                self.cache.replace_all(tasks);
                self.clamp_cursor();
            }
            ApiEvent::Failed { context, message } => {
                self.ui.push_notice(format!("{context} failed: {message}"), now);
            }
        }
    }

    /// Handle one key event, possibly producing a command for the API
    /// worker.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        now: Instant,
        today: NaiveDate,
    ) -> Option<ApiCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match &self.ui.modal {
            ModalState::Closed => match self.focus {
                Focus::List => self.handle_list_key(key, now, today),
                Focus::Search => {
                    self.handle_search_key(key);
                    None
                }
            },
            _ => self.handle_modal_key(key, now, today),
        }
    }

    // -- list mode ----------------------------------------------------

    fn handle_list_key(
        &mut self,
        key: KeyEvent,
        now: Instant,
        today: NaiveDate,
    ) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_tasks().len();
                if len > 0 && self.cursor + 1 < len {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Char('n') => {
                self.ui.open_create();
                None
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.task_under_cursor() {
                    let task = task.clone();
                    self.ui.open_edit(&task);
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.task_under_cursor() {
                    let id = task.id;
                    self.ui.request_delete_one(id);
                }
                None
            }
            KeyCode::Char(' ') => {
                if self.ui.selecting {
                    if let Some(task) = self.task_under_cursor() {
                        let id = task.id;
                        self.ui.toggle_selected(id);
                    }
                    None
                } else {
                    self.toggle_completion()
                }
            }
            KeyCode::Char('v') => {
                self.ui.toggle_selection_mode();
                None
            }
            KeyCode::Char('D') => {
                if self.ui.selecting {
                    self.ui.request_delete_selection();
                }
                None
            }
            KeyCode::Char('K') => self.move_task(true),
            KeyCode::Char('J') => self.move_task(false),
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char('p') => {
                self.ui.filters.priority = cycle(&Priority::ALL, self.ui.filters.priority);
                self.clamp_cursor();
                None
            }
            KeyCode::Char('f') => {
                self.ui.filters.category = cycle(&Category::ALL, self.ui.filters.category);
                self.clamp_cursor();
                None
            }
            KeyCode::Char('x') => {
                self.ui.filters.clear();
                self.clamp_cursor();
                None
            }
            KeyCode::Char('t') => {
                self.ui.toggle_theme();
                None
            }
            KeyCode::Char('c') => {
                self.ui
                    .request_bulk_delete(BulkTarget::Completed, self.cache.tasks(), today, now);
                None
            }
            KeyCode::Char('o') => {
                self.ui
                    .request_bulk_delete(BulkTarget::Overdue, self.cache.tasks(), today, now);
                None
            }
            KeyCode::Char('A') => {
                self.ui
                    .request_bulk_delete(BulkTarget::All, self.cache.tasks(), today, now);
                None
            }
            KeyCode::Char('g') => Some(self.switch_to_guest()),
            KeyCode::Char('r') => Some(self.initial_load()),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::List,
            KeyCode::Backspace => {
                self.ui.filters.query.pop();
                self.clamp_cursor();
            }
            KeyCode::Char(c) => {
                self.ui.filters.query.push(c);
                self.clamp_cursor();
            }
            _ => {}
        }
    }

    // -- modal mode ---------------------------------------------------

    fn handle_modal_key(
        &mut self,
        key: KeyEvent,
        now: Instant,
        today: NaiveDate,
    ) -> Option<ApiCommand> {
        if key.code == KeyCode::Esc {
            self.ui.close_modal();
            return None;
        }

        // Form modals: Enter submits, everything else edits in place.
        if matches!(
            self.ui.modal,
            ModalState::Create(_) | ModalState::Edit { .. }
        ) {
            if key.code == KeyCode::Enter {
                return self.submit_form(now);
            }
            if let ModalState::Create(form) | ModalState::Edit { form, .. } = &mut self.ui.modal {
                match key.code {
                    KeyCode::Backspace => {
                        form.title.pop();
                    }
                    KeyCode::Tab => {
                        form.priority = next_in(&Priority::ALL, form.priority);
                    }
                    KeyCode::BackTab => {
                        form.category = next_in(&Category::ALL, form.category);
                    }
                    KeyCode::Char('+') => {
                        form.due_date = Some(
                            form.due_date
                                .unwrap_or(today)
                                .checked_add_days(Days::new(1))
                                .unwrap_or(today),
                        );
                    }
                    KeyCode::Char('-') => {
                        form.due_date =
                            form.due_date.and_then(|d| d.checked_sub_days(Days::new(1)));
                    }
                    KeyCode::Char('0') => {
                        form.due_date = None;
                    }
                    KeyCode::Char(c) => {
                        form.title.push(c);
                    }
                    _ => {}
                }
            }
            return None;
        }

        // Confirmation modals.
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                let modal = std::mem::replace(&mut self.ui.modal, ModalState::Closed);
                match modal {
                    ModalState::ConfirmDeleteOne { id } => Some(ApiCommand::Delete {
                        owner_id: self.session.owner_id().to_string(),
                        id,
                    }),
                    ModalState::ConfirmDeleteSelection { ids }
                    | ModalState::ConfirmDeleteBulk { ids, .. } => {
                        if self.ui.selecting {
                            self.ui.toggle_selection_mode();
                        }
                        Some(ApiCommand::DeleteMany {
                            owner_id: self.session.owner_id().to_string(),
                            ids,
                        })
                    }
                    _ => None,
                }
            }
            KeyCode::Char('n') => {
                self.ui.close_modal();
                None
            }
            _ => None,
        }
    }

    /// Submit the open create or edit form.
    fn submit_form(&mut self, now: Instant) -> Option<ApiCommand> {
        let (form, edit_id) = match &self.ui.modal {
            ModalState::Create(form) => (form.clone(), None),
            ModalState::Edit { id, form } => (form.clone(), Some(*id)),
            _ => return None,
        };

        let title = form.title.trim().to_string();
        if title.is_empty() {
            self.ui.push_notice("title is required", now);
            return None;
        }

        if let Some(id) = edit_id {
            self.ui.close_modal();
            return Some(ApiCommand::Update {
                owner_id: self.session.owner_id().to_string(),
                id,
                patch: UpdateTaskRequest {
                    title: Some(title),
                    completed: None,
                    due_date: Some(form.due_date.map(due_date_at_noon)),
                    priority: Some(form.priority),
                    category: Some(form.category),
                    order: None,
                },
            });
        }

        // Duplicate check against the local snapshot. Advisory only in
        // the sense that the service never rejects duplicates, but the
        // client sends nothing while the form still matches.
        if self.cache.has_duplicate(&title, form.priority, form.category) {
            self.ui.push_notice("a matching task already exists", now);
            return None;
        }

        self.ui.close_modal();
        Some(ApiCommand::Create {
            request: CreateTaskRequest {
                title,
                owner_id: self.session.owner_id().to_string(),
                due_date: form.due_date.map(due_date_at_noon),
                priority: form.priority,
                category: form.category,
            },
        })
    }

    // -- actions ------------------------------------------------------

    fn toggle_completion(&mut self) -> Option<ApiCommand> {
        let task = self.task_under_cursor()?;
        let (id, completed) = (task.id, task.completed);
        Some(ApiCommand::Update {
            owner_id: self.session.owner_id().to_string(),
            id,
            patch: UpdateTaskRequest::completion(!completed),
        })
    }

    /// Move the task under the cursor one slot up or down. Silently
    /// unavailable while filtering or selecting, since visible indices
    /// would not line up with stored order.
    fn move_task(&mut self, up: bool) -> Option<ApiCommand> {
        if !self.ui.can_reorder() {
            return None;
        }

        let destination = if up {
            self.cursor.checked_sub(1)
        } else {
            Some(self.cursor + 1)
        };
        let entries = reorder::plan_move(self.cache.tasks_mut(), self.cursor, destination)?;

        // Follow the moved task.
        if let Some(dest) = destination {
            self.cursor = dest;
        }

        Some(ApiCommand::ReorderBatch {
            owner_id: self.session.owner_id().to_string(),
            entries,
        })
    }

    /// Drop the current identity and start over as a fresh guest. The
    /// cache is cleared before the reload is even issued so the old
    /// owner's tasks never linger on screen.
    fn switch_to_guest(&mut self) -> ApiCommand {
        self.session = OwnerSession::guest();
        self.cache.clear();
        self.cursor = 0;
        if self.ui.selecting {
            self.ui.toggle_selection_mode();
        }
        self.ui.close_modal();
        self.initial_load()
    }

    // -- helpers ------------------------------------------------------

    fn task_under_cursor(&self) -> Option<&Task> {
        self.visible_tasks().into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Cycle an optional filter through `None -> each value -> None`.
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let pos = all.iter().position(|v| *v == value)?;
            all.get(pos + 1).copied()
        }
    }
}

/// Advance a form field to the next value, wrapping around.
fn next_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    all.get(pos + 1).copied().unwrap_or(all[0])
}
