use todo_shared::{
    validate_description, validate_title, CreateTaskRequest, Task, UpdateTaskRequest,
    ValidationError,
};

/// Field state shared by the add form and the edit dialog: raw input
/// values, whether validation messages should render yet, and the
/// single-flight guard that keeps each form instance to one pending
/// submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    touched: bool,
    in_flight: bool,
}

impl TaskForm {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Edit-dialog form, pre-filled from the task being edited.
    pub fn seeded(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set_title(&mut self, value: String) {
        self.title = value;
    }

    pub fn set_description(&mut self, value: String) {
        self.description = value;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validation message for the title field, shown only once the form
    /// has been submitted at least once. Recomputed from the live value
    /// so the message clears as the user types.
    pub fn title_error(&self) -> Option<ValidationError> {
        if !self.touched {
            return None;
        }
        validate_title(&self.title).err()
    }

    pub fn description_error(&self) -> Option<ValidationError> {
        if !self.touched {
            return None;
        }
        validate_description(&self.description).err()
    }

    pub fn description_chars(&self) -> usize {
        self.description.chars().count()
    }

    /// Validates and enters the in-flight state. Returns `None` without
    /// side effects on the network when a submission is already pending,
    /// or when the input is invalid (fields are marked touched so the
    /// messages render).
    pub fn begin_create(&mut self) -> Option<CreateTaskRequest> {
        if self.in_flight {
            return None;
        }
        match CreateTaskRequest::from_input(&self.title, &self.description) {
            Ok(request) => {
                self.in_flight = true;
                Some(request)
            }
            Err(_) => {
                self.touched = true;
                None
            }
        }
    }

    /// Same contract as `begin_create`, for the edit dialog.
    pub fn begin_edit(&mut self) -> Option<UpdateTaskRequest> {
        if self.in_flight {
            return None;
        }
        match UpdateTaskRequest::edit(&self.title, &self.description) {
            Ok(request) => {
                self.in_flight = true;
                Some(request)
            }
            Err(_) => {
                self.touched = true;
                None
            }
        }
    }

    /// Clears the in-flight flag after a failed submission; the field
    /// values stay put so the user can correct them.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether the form differs from the task it was seeded from. The
    /// edit dialog keeps Save disabled while this is false.
    pub fn is_dirty_vs(&self, task: &Task) -> bool {
        self.title.trim() != task.title
            || self.description.trim() != task.description.as_deref().unwrap_or("")
    }
}
