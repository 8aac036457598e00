use super::UiEvent;
use crate::constants::PAGE_ENTRY_WIDTH;
use crate::shell::{Action, AppState};
use eframe::egui;
use rust_i18n::t;

fn tool_button(ui: &mut egui::Ui, label: &str, hint: &str) -> bool {
    ui.button(label).on_hover_text(hint).clicked()
}

pub fn show_toolbar(
    ui: &mut egui::Ui,
    state: &AppState,
    page_entry: &mut String,
    events: &mut Vec<UiEvent>,
) {
    let lang = state.language().tag();

    ui.horizontal(|ui| {
        if tool_button(ui, "📂", &t!("hints.open", locale = lang)) {
            events.push(UiEvent::PickFileToOpen);
        }
        if tool_button(ui, "💾", &t!("hints.save_as", locale = lang)) {
            events.push(UiEvent::PickSaveDestination);
        }
        if tool_button(ui, "✖", &t!("hints.close_tab", locale = lang)) {
            events.push(Action::CloseActiveTab.into());
        }

        ui.separator();

        if tool_button(ui, "⏮", &t!("hints.first_page", locale = lang)) {
            events.push(Action::FirstPage.into());
        }
        if tool_button(ui, "⏴", &t!("hints.prev_page", locale = lang)) {
            events.push(Action::PrevPage.into());
        }

        let response = ui.add(
            egui::TextEdit::singleline(page_entry)
                .desired_width(PAGE_ENTRY_WIDTH)
                .hint_text(t!("hints.page_entry", locale = lang).as_ref()),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            events.push(Action::GoToPage(std::mem::take(page_entry)).into());
        }

        if tool_button(ui, "⏵", &t!("hints.next_page", locale = lang)) {
            events.push(Action::NextPage.into());
        }
        if tool_button(ui, "⏭", &t!("hints.last_page", locale = lang)) {
            events.push(Action::LastPage.into());
        }

        ui.separator();

        if tool_button(ui, "🔍-", &t!("hints.zoom_out", locale = lang)) {
            events.push(Action::ZoomOut.into());
        }
        if tool_button(ui, &state.zoom_label(), &t!("hints.zoom_reset", locale = lang)) {
            events.push(Action::ResetZoom.into());
        }
        if tool_button(ui, "🔍+", &t!("hints.zoom_in", locale = lang)) {
            events.push(Action::ZoomIn.into());
        }
    });
}
