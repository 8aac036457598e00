use super::UiEvent;
use crate::shell::{Action, AppState, NoticeKind};
use eframe::egui;
use rust_i18n::t;

/// Modal-style window for the pending notice, if any.
pub fn show_notice(ctx: &egui::Context, state: &AppState, events: &mut Vec<UiEvent>) {
    let Some(notice) = state.notice() else {
        return;
    };
    let lang = state.language().tag();

    let mut is_open = true;
    egui::Window::new(notice.title.as_str())
        .id(egui::Id::new("notice_window"))
        .open(&mut is_open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let text = egui::RichText::new(notice.message.as_str());
            let text = match notice.kind {
                NoticeKind::Info => text,
                NoticeKind::Error => text.color(ui.visuals().error_fg_color),
            };
            ui.add(egui::Label::new(text).wrap());

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button(t!("dialogs.ok", locale = lang).as_ref()).clicked() {
                    events.push(Action::DismissNotice.into());
                }
            });
        });

    if !is_open {
        events.push(Action::DismissNotice.into());
    }
}
