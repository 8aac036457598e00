use crate::error::{ReaderError, Result};
use crate::format;
use crate::locale::{self, Language};
use crate::tasks::{TaskResult, TaskRunner};
use crate::viewer::controller::parse_page_input;
use crate::viewer::session::DocumentBackend;
use crate::viewer::tab::{LoadOutcome, RenderDispatch, Tab, TabId};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything the user can ask the viewer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    NewTab,
    OpenFile(PathBuf),
    CloseActiveTab,
    SelectTab(TabId),
    SaveAs(PathBuf),
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GoToPage(String),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    SwitchLanguage(Language),
    ShowShortcuts,
    ShowAbout,
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message waiting to be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

/// Tabs, the active-tab selection and the UI language. Owned by the UI
/// thread; background work reports back through `tasks`.
pub struct AppState {
    tabs: Vec<Tab>,
    active: TabId,
    language: Language,
    next_tab_id: u64,
    notice: Option<Notice>,
    backend: Arc<dyn DocumentBackend>,
    tasks: TaskRunner,
}

impl AppState {
    pub fn new(backend: Arc<dyn DocumentBackend>, language: Language) -> Self {
        let mut state = Self {
            tabs: Vec::new(),
            active: TabId(0),
            language,
            next_tab_id: 1,
            notice: None,
            backend,
            tasks: TaskRunner::new(),
        };
        state.add_tab(None);
        state
    }

    pub fn tasks_mut(&mut self) -> &mut TaskRunner {
        &mut self.tasks
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_id(&self) -> TabId {
        self.active
    }

    fn active_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|tab| tab.id() == self.active)
            .unwrap_or(0)
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_index()]
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        let index = self.active_index();
        &mut self.tabs[index]
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id() == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn show_info(&mut self, title: String, message: String) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            title,
            message,
        });
    }

    fn show_error(&mut self, message: String) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            title: t!("dialogs.error_title", locale = self.language.tag()).into_owned(),
            message,
        });
    }

    /// Appends a tab, makes it active and starts loading `path` into it.
    pub fn add_tab(&mut self, path: Option<PathBuf>) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        self.tabs.push(Tab::new(id));
        self.active = id;

        if let Some(path) = path {
            self.start_load(id, path);
        }
        id
    }

    pub fn select_tab(&mut self, id: TabId) -> bool {
        if self.tabs.iter().any(|tab| tab.id() == id) {
            self.active = id;
            true
        } else {
            false
        }
    }

    /// Closing the last tab leaves a fresh empty one behind.
    pub fn close_active_tab(&mut self) {
        let index = self.active_index();
        let mut tab = self.tabs.remove(index);
        tab.close();

        if self.tabs.is_empty() {
            self.add_tab(None);
            return;
        }

        let next = index.min(self.tabs.len() - 1);
        self.active = self.tabs[next].id();
    }

    /// Loads into the active tab when it is empty, otherwise into a new
    /// tab. A document being viewed is never replaced.
    pub fn open_file(&mut self, path: PathBuf) {
        if self.active_tab().controller.has_document() {
            self.add_tab(Some(path));
        } else {
            let id = self.active;
            self.start_load(id, path);
        }
    }

    fn start_load(&mut self, id: TabId, path: PathBuf) {
        let Some(tab) = self.tab_mut(id) else {
            return;
        };
        let generation = tab.begin_load(&path);
        let backend = Arc::clone(&self.backend);
        self.tasks.spawn_load(id, generation, backend, path);
    }

    fn request_render(&mut self, id: TabId) {
        let Some(tab) = self.tab_mut(id) else {
            return;
        };
        match tab.begin_render() {
            Ok(RenderDispatch::Cached) => {}
            Ok(RenderDispatch::Pending {
                generation,
                request,
            }) => self.tasks.spawn_render(id, generation, request),
            Err(ReaderError::NoDocument) => {}
            Err(e) => log::warn!("Cannot render tab {}: {}", id.0, e),
        }
    }

    pub fn switch_language(&mut self, language: Language) -> bool {
        if self.language == language {
            return false;
        }
        log::info!("Switching language to {}", language.tag());
        self.language = language;
        true
    }

    /// Applies every background result that has arrived.
    pub fn process_task_results(&mut self) {
        for result in self.tasks.drain() {
            self.apply_task_result(result);
        }
    }

    /// Blocks until no background work is outstanding. Returns false on
    /// timeout.
    pub fn wait_for_tasks(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.tasks.in_flight() > 0 {
            match self.tasks.next_before(deadline) {
                Some(result) => self.apply_task_result(result),
                None => return false,
            }
        }
        true
    }

    fn apply_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Loaded {
                tab,
                generation,
                result,
            } => {
                let Some(target) = self.tab_mut(tab) else {
                    log::debug!("Dropping load result for closed tab {}", tab.0);
                    return;
                };
                if target.finish_load(generation, result) == LoadOutcome::Attached {
                    self.request_render(tab);
                }
            }
            TaskResult::Rendered {
                tab,
                generation,
                key,
                result,
            } => {
                if let Some(target) = self.tab_mut(tab) {
                    target.finish_render(generation, key, result);
                }
            }
            TaskResult::Saved {
                destination,
                result,
            } => {
                let lang = self.language.tag();
                match result {
                    Ok(_) => self.show_info(
                        t!("dialogs.info_title", locale = lang).into_owned(),
                        t!("messages.save_success", locale = lang).into_owned(),
                    ),
                    Err(e) => {
                        log::warn!("Saving to {} failed: {}", destination.display(), e);
                        let message = t!(
                            "messages.save_failed",
                            locale = lang,
                            error = locale::describe_error(&e, self.language)
                        )
                        .into_owned();
                        self.show_error(message);
                    }
                }
            }
        }
    }

    fn save_as(&mut self, destination: PathBuf) {
        let source = self
            .active_tab()
            .controller
            .session()
            .map(|session| session.path().to_path_buf());

        match source {
            Some(source) => self.tasks.spawn_save(source, destination),
            None => self.notify_nothing_to_save(),
        }
    }

    fn go_to_page(&mut self, input: &str) {
        let result = parse_page_input(input)
            .and_then(|page| self.active_tab_mut().controller.go_to_page(page));
        match result {
            Ok(()) => self.request_render(self.active),
            Err(e) => {
                let message = locale::describe_error(&e, self.language);
                self.show_error(message);
            }
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Tab) -> Result<bool>) {
        if let Ok(true) = step(self.active_tab_mut()) {
            self.request_render(self.active);
        }
    }

    fn adjust_zoom(&mut self, adjust: impl FnOnce(&mut Tab)) {
        let tab = self.active_tab_mut();
        adjust(tab);
        if tab.controller.has_document() {
            self.request_render(self.active);
        }
    }

    /// Single entry point for UI input.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::NewTab => {
                self.add_tab(None);
            }
            Action::OpenFile(path) => self.open_file(path),
            Action::CloseActiveTab => self.close_active_tab(),
            Action::SelectTab(id) => {
                self.select_tab(id);
            }
            Action::SaveAs(destination) => self.save_as(destination),
            Action::FirstPage => self.navigate(|tab| tab.controller.first_page()),
            Action::PrevPage => self.navigate(|tab| tab.controller.prev_page()),
            Action::NextPage => self.navigate(|tab| tab.controller.next_page()),
            Action::LastPage => self.navigate(|tab| tab.controller.last_page()),
            Action::GoToPage(input) => self.go_to_page(&input),
            Action::ZoomIn => self.adjust_zoom(|tab| tab.controller.zoom_in()),
            Action::ZoomOut => self.adjust_zoom(|tab| tab.controller.zoom_out()),
            Action::ResetZoom => self.adjust_zoom(|tab| tab.controller.reset_zoom()),
            Action::SwitchLanguage(language) => {
                self.switch_language(language);
            }
            Action::ShowShortcuts => {
                let lang = self.language.tag();
                self.show_info(
                    t!("dialogs.shortcuts_title", locale = lang).into_owned(),
                    t!("dialogs.shortcuts_text", locale = lang).into_owned(),
                );
            }
            Action::ShowAbout => {
                let title = t!("dialogs.about_title", locale = self.language.tag()).into_owned();
                self.show_info(title, locale::about_text(self.language));
            }
            Action::DismissNotice => self.notice = None,
        }
    }

    pub fn window_title(&self) -> String {
        locale::window_title(self.language)
    }

    pub fn status_text(&self) -> String {
        self.active_tab().controller.status_text(self.language)
    }

    pub fn zoom_label(&self) -> String {
        let controller = &self.active_tab().controller;
        let zoom = if controller.has_document() {
            controller.zoom()
        } else {
            crate::constants::DEFAULT_ZOOM
        };
        format!("{}%", format::zoom_percent(zoom))
    }

    /// Suggested file name for "save as".
    pub fn save_file_name(&self) -> Option<String> {
        self.active_tab()
            .controller
            .session()
            .map(|session| session.file_name())
    }

    /// Suggested file name before asking for a destination. Without a
    /// document the "nothing to save" notice is raised instead.
    pub fn prepare_save_as(&mut self) -> Option<String> {
        let name = self.save_file_name();
        if name.is_none() {
            self.notify_nothing_to_save();
        }
        name
    }

    fn notify_nothing_to_save(&mut self) {
        let lang = self.language.tag();
        self.show_info(
            t!("dialogs.info_title", locale = lang).into_owned(),
            t!("messages.no_document_to_save", locale = lang).into_owned(),
        );
    }
}
