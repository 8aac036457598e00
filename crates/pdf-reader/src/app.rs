use crate::shell::AppState;
use crate::ui::canvas::{self, CanvasState};
use crate::ui::{UiEvent, dialogs, fonts, menu, shortcuts, tab_bar, toolbar};
use crate::viewer::tab::TabId;
use eframe::egui;
use rust_i18n::t;
use std::collections::HashMap;
use std::path::PathBuf;

pub struct ReaderApp {
    state: AppState,
    page_entry: String,
    canvases: HashMap<TabId, CanvasState>,
    title: String,
}

impl ReaderApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut state: AppState,
        initial_file: Option<PathBuf>,
    ) -> Self {
        fonts::install_cjk_fallback(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        state.tasks_mut().set_waker(move || ctx.request_repaint());

        if let Some(path) = initial_file {
            state.open_file(path);
        }

        let title = state.window_title();
        Self {
            state,
            page_entry: String::new(),
            canvases: HashMap::new(),
            title,
        }
    }

    fn pdf_dialog(&self) -> rfd::FileDialog {
        let filter = t!("dialogs.pdf_filter", locale = self.state.language().tag());
        rfd::FileDialog::new().add_filter(filter.as_ref(), &["pdf", "PDF"])
    }

    fn handle_event(&mut self, ctx: &egui::Context, event: UiEvent) {
        match event {
            UiEvent::Action(action) => self.state.dispatch(action),
            UiEvent::PickFileToOpen => {
                if let Some(path) = self.pdf_dialog().pick_file() {
                    self.state.open_file(path);
                }
            }
            UiEvent::PickSaveDestination => {
                let Some(name) = self.state.prepare_save_as() else {
                    return;
                };
                if let Some(destination) = self.pdf_dialog().set_file_name(name).save_file() {
                    self.state.dispatch(crate::shell::Action::SaveAs(destination));
                }
            }
            UiEvent::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.state.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.process_task_results();

        let mut events: Vec<UiEvent> = shortcuts::collect_shortcuts(ctx)
            .into_iter()
            .map(UiEvent::from)
            .collect();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            menu::show_menu_bar(ui, &self.state, &mut events);
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show_toolbar(ui, &self.state, &mut self.page_entry, &mut events);
        });

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            tab_bar::show_tab_bar(ui, &self.state, &mut events);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.state.status_text());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let tab = self.state.active_tab();
            let canvas = self.canvases.entry(tab.id()).or_default();
            canvas::show_canvas(ui, tab, self.state.language(), canvas, &mut events);
        });

        dialogs::show_notice(ctx, &self.state, &mut events);

        for event in events {
            self.handle_event(ctx, event);
        }

        let state = &self.state;
        self.canvases
            .retain(|id, _| state.tabs().iter().any(|tab| tab.id() == *id));

        self.sync_title(ctx);
    }
}
