//! Snapshots published by a [`CrudScreen`](super::CrudScreen).

use resource_framework::RestEntity;

/// Which form, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Adding,
    Editing,
}

/// The message shown after an action, in place of a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Everything a view needs to render one resource screen.
#[derive(Debug, Clone)]
pub struct ScreenState<T: RestEntity> {
    /// Last successfully loaded list, replaced wholesale on every reload.
    pub items: Vec<T>,
    /// Copy of the record being edited.
    pub selected: Option<T>,
    /// Fields of the add form.
    pub draft: T,
    pub mode: Mode,
    pub form_visible: bool,
    /// A reload or a create/update/delete is in flight.
    pub loading: bool,
    /// Id awaiting delete confirmation.
    pub pending_delete: Option<T::Id>,
    pub notice: Option<Notice>,
}

impl<T: RestEntity> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            draft: T::default(),
            mode: Mode::Idle,
            form_visible: false,
            loading: false,
            pending_delete: None,
            notice: None,
        }
    }
}

impl<T: RestEntity> ScreenState<T> {
    pub fn edit_mode(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// The record the open form is bound to.
    pub fn active(&self) -> Option<&T> {
        match self.mode {
            Mode::Adding => Some(&self.draft),
            Mode::Editing => self.selected.as_ref(),
            Mode::Idle => None,
        }
    }

    /// Whether an item with `id` is in the current list.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == Some(id))
    }

    pub(crate) fn close_form(&mut self) {
        self.form_visible = false;
        self.mode = Mode::Idle;
        self.selected = None;
        self.draft = T::default();
    }
}
