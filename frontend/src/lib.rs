use std::collections::HashSet;

use chrono::Utc;
use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use todo_shared::{Task, ValidationError, DESCRIPTION_MAX_CHARS};
use web_sys::window;

pub mod api;
pub mod form;
pub mod health;
pub mod state;
pub mod timefmt;

use api::ApiError;
use form::TaskForm;
use health::HealthStatus;

#[derive(Debug, Clone)]
pub enum Msg {
    // health widget
    CheckHealth,
    HealthChecked(HealthStatus),

    // task list
    LoadTasks,
    TasksLoaded(Vec<Task>),
    LoadFailed(ApiError),
    ToggleTask(i64),
    TaskToggled(Task),
    ToggleFailed(i64, ApiError),
    DeleteTask(i64),
    TaskDeleted(i64),
    DeleteFailed(i64, ApiError),

    // add form
    NewTitleInput(String),
    NewDescriptionInput(String),
    SubmitNewTask,
    ClearNewTask,
    TaskCreated(Task),
    CreateFailed(ApiError),

    // edit dialog
    OpenEdit(i64),
    EditTitleInput(String),
    EditDescriptionInput(String),
    ResetEdit,
    SaveEdit,
    CancelEdit,
    TaskSaved(Task),
    SaveFailed(ApiError),

    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible snackbar-style message. The health-check failure is the
/// one notice that carries a retry action.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub offer_health_retry: bool,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            offer_health_retry: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            offer_health_retry: false,
        }
    }
}

/// Modal edit state: the task being edited plus its form. `task` keeps
/// the original values for the dirty check and the reset affordance.
#[derive(Debug, Clone)]
pub struct EditDialog {
    task: Task,
    form: TaskForm,
}

#[derive(Debug, Clone)]
pub struct Model {
    tasks: Vec<Task>,
    loading: bool,
    // ids with a toggle or delete in flight; their row controls are disabled
    busy: HashSet<i64>,
    add_form: TaskForm,
    edit: Option<EditDialog>,
    health: HealthStatus,
    checking_health: bool,
    notice: Option<Notice>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            loading: false,
            busy: HashSet::new(),
            add_form: TaskForm::empty(),
            edit: None,
            health: HealthStatus::unchecked(),
            checking_health: false,
            notice: None,
        }
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        // startup: one health probe, one list fetch
        Cmd::batch(vec![
            Cmd::new(async { Msg::CheckHealth }),
            Cmd::new(async { Msg::LoadTasks }),
        ])
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::CheckHealth => {
                self.checking_health = true;
                if self.notice.as_ref().is_some_and(|n| n.offer_health_retry) {
                    self.notice = None;
                }
                Cmd::new(async {
                    let result = api::check_health().await;
                    Msg::HealthChecked(HealthStatus::from_result(&result, Utc::now()))
                })
            }
            Msg::HealthChecked(status) => {
                self.checking_health = false;
                if !status.is_healthy {
                    log_error(&format!("health check failed: {}", status.message));
                    self.notice = Some(Notice {
                        kind: NoticeKind::Error,
                        message: status.message.clone(),
                        offer_health_retry: true,
                    });
                }
                self.health = status;
                Cmd::none()
            }
            Msg::LoadTasks => {
                self.loading = true;
                Cmd::new(async {
                    match api::list_all().await {
                        Ok(page) => Msg::TasksLoaded(page.content),
                        Err(e) => Msg::LoadFailed(e),
                    }
                })
            }
            Msg::TasksLoaded(mut tasks) => {
                state::sort_newest_first(&mut tasks);
                self.tasks = tasks;
                self.loading = false;
                Cmd::none()
            }
            Msg::LoadFailed(err) => {
                self.loading = false;
                self.report_error("Failed to load tasks", &err);
                Cmd::none()
            }
            Msg::ToggleTask(id) => {
                if self.busy.contains(&id) {
                    return Cmd::none();
                }
                self.busy.insert(id);
                Cmd::new(async move {
                    match api::toggle_task(id).await {
                        Ok(task) => Msg::TaskToggled(task),
                        Err(e) => Msg::ToggleFailed(id, e),
                    }
                })
            }
            Msg::TaskToggled(task) => {
                self.busy.remove(&task.id);
                let label = if task.completed {
                    "Task completed"
                } else {
                    "Task reopened"
                };
                if state::merge_by_id(&mut self.tasks, task) {
                    self.notice = Some(Notice::success(label));
                }
                Cmd::none()
            }
            Msg::ToggleFailed(id, err) => {
                self.busy.remove(&id);
                self.report_error("Failed to update task", &err);
                Cmd::none()
            }
            Msg::DeleteTask(id) => {
                if self.busy.contains(&id) {
                    return Cmd::none();
                }
                let Some(title) = self.tasks.iter().find(|t| t.id == id).map(|t| t.title.clone())
                else {
                    return Cmd::none();
                };
                let confirmed = window()
                    .and_then(|w| {
                        w.confirm_with_message(&format!(
                            "Are you sure you want to delete \"{title}\"?"
                        ))
                        .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return Cmd::none();
                }
                self.busy.insert(id);
                Cmd::new(async move {
                    match api::delete_task(id).await {
                        Ok(()) => Msg::TaskDeleted(id),
                        Err(e) => Msg::DeleteFailed(id, e),
                    }
                })
            }
            Msg::TaskDeleted(id) => {
                self.busy.remove(&id);
                if state::remove_by_id(&mut self.tasks, id) {
                    self.notice = Some(Notice::success("Task deleted"));
                }
                Cmd::none()
            }
            Msg::DeleteFailed(id, err) => {
                self.busy.remove(&id);
                self.report_error("Failed to delete task", &err);
                Cmd::none()
            }
            Msg::NewTitleInput(value) => {
                self.add_form.set_title(value);
                Cmd::none()
            }
            Msg::NewDescriptionInput(value) => {
                self.add_form.set_description(value);
                Cmd::none()
            }
            Msg::SubmitNewTask => match self.add_form.begin_create() {
                Some(request) => Cmd::new(async move {
                    match api::create_task(&request).await {
                        Ok(task) => Msg::TaskCreated(task),
                        Err(e) => Msg::CreateFailed(e),
                    }
                }),
                None => Cmd::none(),
            },
            Msg::ClearNewTask => {
                self.add_form.reset();
                Cmd::none()
            }
            Msg::TaskCreated(task) => {
                self.add_form.reset();
                state::prepend(&mut self.tasks, task);
                self.notice = Some(Notice::success("Task created"));
                Cmd::none()
            }
            Msg::CreateFailed(err) => {
                self.add_form.finish();
                self.report_error("Failed to create task", &err);
                Cmd::none()
            }
            Msg::OpenEdit(id) => {
                if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                    self.edit = Some(EditDialog {
                        form: TaskForm::seeded(task),
                        task: task.clone(),
                    });
                }
                Cmd::none()
            }
            Msg::EditTitleInput(value) => {
                if let Some(edit) = &mut self.edit {
                    edit.form.set_title(value);
                }
                Cmd::none()
            }
            Msg::EditDescriptionInput(value) => {
                if let Some(edit) = &mut self.edit {
                    edit.form.set_description(value);
                }
                Cmd::none()
            }
            Msg::ResetEdit => {
                if let Some(edit) = &mut self.edit {
                    edit.form = TaskForm::seeded(&edit.task);
                }
                Cmd::none()
            }
            Msg::SaveEdit => {
                let Some(edit) = &mut self.edit else {
                    return Cmd::none();
                };
                match edit.form.begin_edit() {
                    Some(request) => {
                        let id = edit.task.id;
                        Cmd::new(async move {
                            match api::update_task(id, &request).await {
                                Ok(task) => Msg::TaskSaved(task),
                                Err(e) => Msg::SaveFailed(e),
                            }
                        })
                    }
                    None => Cmd::none(),
                }
            }
            Msg::CancelEdit => {
                self.edit = None;
                Cmd::none()
            }
            Msg::TaskSaved(task) => {
                self.edit = None;
                if state::merge_by_id(&mut self.tasks, task) {
                    self.notice = Some(Notice::success("Task updated"));
                }
                Cmd::none()
            }
            Msg::SaveFailed(err) => {
                if let Some(edit) = &mut self.edit {
                    edit.form.finish();
                }
                self.report_error("Failed to update task", &err);
                Cmd::none()
            }
            Msg::DismissNotice => {
                self.notice = None;
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-slate-100 text-slate-900")],
            [
                self.view_header(),
                div(
                    [class("max-w-3xl mx-auto px-6 py-8 space-y-8")],
                    [self.view_add_form(), self.view_task_list()],
                ),
                self.view_edit_dialog(),
                self.view_notice(),
            ],
        )
    }
}

impl Model {
    /// Surfaces a failed request: console line plus a dismissible
    /// notice. The backend's own message wins when it sent one; a
    /// transport failure always reads as offline.
    fn report_error(&mut self, context: &str, err: &ApiError) {
        log_error(&format!("{context}: {err}"));
        let message = match err {
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Offline => "Backend offline".to_string(),
            ApiError::Decode(_) => context.to_string(),
        };
        self.notice = Some(Notice::error(message));
    }

    fn view_header(&self) -> Node<Msg> {
        header(
            [class("bg-white shadow border-b border-slate-200")],
            [div(
                [class("max-w-3xl mx-auto px-6 py-4 flex items-center justify-between")],
                [
                    h1([class("text-2xl font-bold")], [text("Task Manager")]),
                    self.view_health_chip(),
                ],
            )],
        )
    }

    fn view_health_chip(&self) -> Node<Msg> {
        let dot = if self.health.is_healthy {
            "bg-green-500"
        } else {
            "bg-red-500"
        };
        div(
            [class("flex items-center gap-3 text-sm")],
            [
                span([class(&format!("w-2.5 h-2.5 rounded-full {dot}"))], []),
                span([class("text-slate-600")], [text(&self.health.message)]),
                match self.health.last_checked {
                    Some(at) => span(
                        [class("text-slate-400")],
                        [text(&format!("checked {}", at.format("%H:%M:%S")))],
                    ),
                    None => span([], []),
                },
                button(
                    [
                        on_click(|_| Msg::CheckHealth),
                        disabled(self.checking_health),
                        class("px-2 py-1 rounded border border-slate-300 hover:bg-slate-50"),
                    ],
                    [if self.checking_health {
                        text("Checking...")
                    } else {
                        text("Check again")
                    }],
                ),
            ],
        )
    }

    fn view_add_form(&self) -> Node<Msg> {
        let form = &self.add_form;
        div(
            [class("bg-white rounded-lg shadow p-6 space-y-4")],
            [
                h2([class("text-lg font-semibold")], [text("Add New Task")]),
                input(
                    [
                        r#type("text"),
                        placeholder("Task title"),
                        value(&form.title),
                        on_input(|event| Msg::NewTitleInput(event.value())),
                        class("w-full px-3 py-2 border border-slate-300 rounded-md"),
                    ],
                    [],
                ),
                view_field_error(form.title_error()),
                textarea(
                    [
                        placeholder("Task description (optional)"),
                        value(&form.description),
                        on_input(|event| Msg::NewDescriptionInput(event.value())),
                        class("w-full px-3 py-2 border border-slate-300 rounded-md h-20 resize-y"),
                    ],
                    [],
                ),
                div(
                    [class("flex items-center justify-between")],
                    [
                        view_field_error(form.description_error()),
                        span(
                            [class("text-xs text-slate-400")],
                            [text(&format!(
                                "{}/{}",
                                form.description_chars(),
                                DESCRIPTION_MAX_CHARS
                            ))],
                        ),
                    ],
                ),
                div(
                    [class("flex gap-2")],
                    [
                        button(
                            [
                                on_click(|_| Msg::SubmitNewTask),
                                disabled(form.in_flight()),
                                class("bg-blue-600 hover:bg-blue-700 text-white font-medium px-5 py-2 rounded-md"),
                            ],
                            [if form.in_flight() {
                                text("Adding...")
                            } else {
                                text("Add Task")
                            }],
                        ),
                        button(
                            [
                                on_click(|_| Msg::ClearNewTask),
                                disabled(form.in_flight()),
                                class("px-4 py-2 rounded-md border border-slate-300 hover:bg-slate-50"),
                            ],
                            [text("Clear")],
                        ),
                    ],
                ),
            ],
        )
    }

    fn view_task_list(&self) -> Node<Msg> {
        if self.loading {
            return div(
                [class("text-center py-10 text-slate-500 italic")],
                [text("Loading...")],
            );
        }
        if self.tasks.is_empty() {
            return div(
                [class("text-center py-12 text-slate-500")],
                [
                    p([class("text-lg font-medium")], [text("No tasks yet")]),
                    p([], [text("Add one above to get started.")]),
                ],
            );
        }
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        div(
            [class("space-y-4")],
            [
                div(
                    [class("flex gap-2 text-sm")],
                    [
                        stat_badge(
                            &format!("{} total", self.tasks.len()),
                            "bg-slate-200 text-slate-700",
                        ),
                        stat_badge(
                            &format!("{} active", self.tasks.len() - completed),
                            "bg-yellow-100 text-yellow-700",
                        ),
                        stat_badge(&format!("{completed} completed"), "bg-green-100 text-green-700"),
                    ],
                ),
                div(
                    [class("space-y-3")],
                    self.tasks
                        .iter()
                        .map(|task| self.view_task(task))
                        .collect::<Vec<_>>(),
                ),
            ],
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let is_busy = self.busy.contains(&task.id);
        let task_id = task.id;
        div(
            [
                key(task.id.to_string()),
                class(&format!(
                    "bg-white rounded-lg shadow p-4 flex items-start gap-4 {}",
                    if task.completed { "opacity-75" } else { "" }
                )),
            ],
            [
                input(
                    [
                        r#type("checkbox"),
                        checked(task.completed),
                        disabled(is_busy),
                        on_click(move |_| Msg::ToggleTask(task_id)),
                        class("mt-1 w-5 h-5"),
                    ],
                    [],
                ),
                div(
                    [class("flex-1 min-w-0 space-y-1")],
                    [
                        h3(
                            [class(&format!(
                                "text-base font-semibold {}",
                                if task.completed {
                                    "line-through text-slate-400"
                                } else {
                                    ""
                                }
                            ))],
                            [text(&task.title)],
                        ),
                        match task.description.as_deref() {
                            Some(description) => p(
                                [class("text-sm text-slate-600 break-words")],
                                [text(description)],
                            ),
                            None => span([], []),
                        },
                        span(
                            [class("text-xs text-slate-400")],
                            [text(&timefmt::relative_age(task.created_at, Utc::now()))],
                        ),
                    ],
                ),
                div(
                    [class("flex gap-2")],
                    [
                        button(
                            [
                                on_click(move |_| Msg::OpenEdit(task_id)),
                                disabled(is_busy),
                                class("px-3 py-1 rounded border border-slate-300 text-sm hover:bg-slate-50"),
                            ],
                            [text("Edit")],
                        ),
                        button(
                            [
                                on_click(move |_| Msg::DeleteTask(task_id)),
                                disabled(is_busy),
                                class("px-3 py-1 rounded border border-red-300 text-red-600 text-sm hover:bg-red-50"),
                            ],
                            [if is_busy { text("...") } else { text("Delete") }],
                        ),
                    ],
                ),
            ],
        )
    }

    fn view_edit_dialog(&self) -> Node<Msg> {
        let Some(edit) = &self.edit else {
            return span([], []);
        };
        let form = &edit.form;
        let save_disabled = form.in_flight() || !form.is_dirty_vs(&edit.task);
        div(
            [class("fixed inset-0 bg-black/40 flex items-center justify-center p-4")],
            [div(
                [class("bg-white rounded-lg shadow-xl w-full max-w-lg p-6 space-y-4")],
                [
                    h2([class("text-lg font-semibold")], [text("Edit Task")]),
                    input(
                        [
                            r#type("text"),
                            value(&form.title),
                            on_input(|event| Msg::EditTitleInput(event.value())),
                            class("w-full px-3 py-2 border border-slate-300 rounded-md"),
                        ],
                        [],
                    ),
                    view_field_error(form.title_error()),
                    textarea(
                        [
                            value(&form.description),
                            on_input(|event| Msg::EditDescriptionInput(event.value())),
                            class("w-full px-3 py-2 border border-slate-300 rounded-md h-24 resize-y"),
                        ],
                        [],
                    ),
                    div(
                        [class("flex items-center justify-between")],
                        [
                            view_field_error(form.description_error()),
                            span(
                                [class("text-xs text-slate-400")],
                                [text(&format!(
                                    "{}/{}",
                                    form.description_chars(),
                                    DESCRIPTION_MAX_CHARS
                                ))],
                            ),
                        ],
                    ),
                    p(
                        [class("text-xs text-slate-400")],
                        [text(&format!(
                            "Created {}",
                            edit.task.created_at.format("%Y-%m-%d %H:%M")
                        ))],
                    ),
                    div(
                        [class("flex gap-2 justify-end")],
                        [
                            button(
                                [
                                    on_click(|_| Msg::ResetEdit),
                                    disabled(form.in_flight()),
                                    class("px-4 py-2 rounded-md border border-slate-300 hover:bg-slate-50"),
                                ],
                                [text("Reset")],
                            ),
                            button(
                                [
                                    on_click(|_| Msg::CancelEdit),
                                    disabled(form.in_flight()),
                                    class("px-4 py-2 rounded-md border border-slate-300 hover:bg-slate-50"),
                                ],
                                [text("Cancel")],
                            ),
                            button(
                                [
                                    on_click(|_| Msg::SaveEdit),
                                    disabled(save_disabled),
                                    class("bg-blue-600 hover:bg-blue-700 text-white font-medium px-5 py-2 rounded-md"),
                                ],
                                [if form.in_flight() {
                                    text("Saving...")
                                } else {
                                    text("Save")
                                }],
                            ),
                        ],
                    ),
                ],
            )],
        )
    }

    fn view_notice(&self) -> Node<Msg> {
        let Some(notice) = &self.notice else {
            return span([], []);
        };
        let colors = match notice.kind {
            NoticeKind::Success => "bg-green-600",
            NoticeKind::Error => "bg-red-600",
        };
        div(
            [class(&format!(
                "fixed bottom-4 left-1/2 -translate-x-1/2 text-white rounded-lg shadow-lg px-4 py-3 flex items-center gap-3 {colors}"
            ))],
            [
                span([], [text(&notice.message)]),
                if notice.offer_health_retry {
                    button(
                        [on_click(|_| Msg::CheckHealth), class("underline font-medium")],
                        [text("Retry")],
                    )
                } else {
                    span([], [])
                },
                button(
                    [on_click(|_| Msg::DismissNotice), class("font-bold")],
                    [text("✕")],
                ),
            ],
        )
    }
}

fn view_field_error(error: Option<ValidationError>) -> Node<Msg> {
    match error {
        Some(err) => p([class("text-sm text-red-600")], [text(&err.to_string())]),
        None => span([], []),
    }
}

fn stat_badge(label: &str, colors: &str) -> Node<Msg> {
    span(
        [class(&format!("px-2 py-1 rounded-full font-medium {colors}"))],
        [text(label)],
    )
}

// console on the wasm target; plain stderr under native unit tests
fn log_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: i64, minutes: i64) -> Task {
        let stamp = Utc.timestamp_opt(1_700_000_000 + minutes * 60, 0).unwrap();
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            completed: false,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn load_sets_flag_then_replaces_sorted() {
        let mut model = Model::default();
        model.update(Msg::LoadTasks);
        assert!(model.loading);

        model.update(Msg::TasksLoaded(vec![task(1, 0), task(2, 10)]));
        assert!(!model.loading);
        let ids: Vec<i64> = model.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn failed_load_keeps_list_and_surfaces_error() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::LoadTasks);
        model.update(Msg::LoadFailed(ApiError::Offline));

        assert!(!model.loading);
        assert_eq!(model.tasks.len(), 1);
        let notice = model.notice.expect("error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Backend offline");
    }

    #[test]
    fn created_task_lands_at_head_and_form_resets() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::NewTitleInput("New one".to_string()));
        model.update(Msg::SubmitNewTask);
        assert!(model.add_form.in_flight());

        model.update(Msg::TaskCreated(task(2, 10)));
        assert_eq!(model.tasks[0].id, 2);
        assert_eq!(model.tasks.len(), 2);
        assert!(!model.add_form.in_flight());
        assert!(model.add_form.title.is_empty());
    }

    #[test]
    fn empty_title_submit_is_rejected_locally() {
        let mut model = Model::default();
        model.update(Msg::NewTitleInput("   ".to_string()));
        model.update(Msg::SubmitNewTask);

        // never entered the in-flight state, so no request was built
        assert!(!model.add_form.in_flight());
        assert_eq!(
            model.add_form.title_error(),
            Some(ValidationError::TitleRequired)
        );
    }

    #[test]
    fn create_failure_keeps_input_for_correction() {
        let mut model = Model::default();
        model.update(Msg::NewTitleInput("Keep me".to_string()));
        model.update(Msg::SubmitNewTask);
        model.update(Msg::CreateFailed(ApiError::Http {
            status: 400,
            message: "Title is required".to_string(),
        }));

        assert!(!model.add_form.in_flight());
        assert_eq!(model.add_form.title, "Keep me");
        assert_eq!(model.notice.unwrap().message, "Title is required");
    }

    #[test]
    fn toggle_response_replaces_only_its_task() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0), task(2, 10)]));
        model.update(Msg::ToggleTask(2));
        assert!(model.busy.contains(&2));

        let mut toggled = task(2, 10);
        toggled.completed = true;
        model.update(Msg::TaskToggled(toggled));

        assert!(!model.busy.contains(&2));
        assert!(model.tasks.iter().find(|t| t.id == 2).unwrap().completed);
        assert!(!model.tasks.iter().find(|t| t.id == 1).unwrap().completed);
    }

    #[test]
    fn toggle_failure_leaves_state_unchanged() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::ToggleTask(1));
        model.update(Msg::ToggleFailed(
            1,
            ApiError::Http {
                status: 500,
                message: "Request failed (HTTP 500)".to_string(),
            },
        ));

        assert!(!model.busy.contains(&1));
        assert!(!model.tasks[0].completed);
        assert_eq!(model.notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn delete_removes_exactly_the_matching_task() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0), task(2, 10), task(3, 20)]));
        model.update(Msg::TaskDeleted(2));

        let ids: Vec<i64> = model.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn edit_dialog_seeds_saves_and_closes() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::OpenEdit(1));
        assert_eq!(model.edit.as_ref().unwrap().form.title, "task 1");

        model.update(Msg::EditTitleInput("task 1 renamed".to_string()));
        model.update(Msg::SaveEdit);
        assert!(model.edit.as_ref().unwrap().form.in_flight());

        let mut saved = task(1, 0);
        saved.title = "task 1 renamed".to_string();
        model.update(Msg::TaskSaved(saved));

        assert!(model.edit.is_none());
        assert_eq!(model.tasks[0].title, "task 1 renamed");
    }

    #[test]
    fn cancel_edit_changes_nothing() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::OpenEdit(1));
        model.update(Msg::EditTitleInput("scratch".to_string()));
        model.update(Msg::CancelEdit);

        assert!(model.edit.is_none());
        assert_eq!(model.tasks[0].title, "task 1");
    }

    #[test]
    fn save_failure_keeps_dialog_open() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::OpenEdit(1));
        model.update(Msg::EditTitleInput("renamed".to_string()));
        model.update(Msg::SaveEdit);
        model.update(Msg::SaveFailed(ApiError::Offline));

        let edit = model.edit.as_ref().expect("dialog stays open");
        assert!(!edit.form.in_flight());
        assert_eq!(edit.form.title, "renamed");
        assert_eq!(model.tasks[0].title, "task 1");
    }

    #[test]
    fn failed_health_check_offers_retry() {
        let mut model = Model::default();
        model.update(Msg::HealthChecked(HealthStatus::from_result(
            &Err(ApiError::Offline),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        )));

        assert!(!model.health.is_healthy);
        let notice = model.notice.clone().expect("failure notice");
        assert!(notice.offer_health_retry);
        assert_eq!(notice.message, "Backend offline");

        // retrying clears the failure notice and marks the check pending
        model.update(Msg::CheckHealth);
        assert!(model.checking_health);
        assert!(model.notice.is_none());
    }

    #[test]
    fn successful_health_check_updates_chip_quietly() {
        let mut model = Model::default();
        model.update(Msg::CheckHealth);
        let status = HealthStatus {
            is_healthy: true,
            message: "Backend connected".to_string(),
            last_checked: Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        };
        model.update(Msg::HealthChecked(status.clone()));

        assert!(!model.checking_health);
        assert_eq!(model.health, status);
        assert!(model.notice.is_none());
    }

    #[test]
    fn notices_are_dismissible() {
        let mut model = Model::default();
        model.update(Msg::TasksLoaded(vec![task(1, 0)]));
        model.update(Msg::TaskDeleted(1));
        assert!(model.notice.is_some());

        model.update(Msg::DismissNotice);
        assert!(model.notice.is_none());
    }
}
