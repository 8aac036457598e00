use super::UiEvent;
use crate::locale::Language;
use crate::shell::{Action, AppState};
use eframe::egui;
use rust_i18n::t;

fn menu_item(ui: &mut egui::Ui, label: &str, event: UiEvent, events: &mut Vec<UiEvent>) {
    if ui.button(label).clicked() {
        events.push(event);
        ui.close();
    }
}

pub fn show_menu_bar(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<UiEvent>) {
    let lang = state.language().tag();

    egui::MenuBar::new().ui(ui, |ui| {
        ui.menu_button(t!("menu.file", locale = lang).as_ref(), |ui| {
            ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
            menu_item(ui, &t!("menu.open", locale = lang), UiEvent::PickFileToOpen, events);
            menu_item(ui, &t!("menu.new_tab", locale = lang), Action::NewTab.into(), events);
            menu_item(ui, &t!("menu.save_as", locale = lang), UiEvent::PickSaveDestination, events);
            menu_item(ui, &t!("menu.close_tab", locale = lang), Action::CloseActiveTab.into(), events);
            ui.separator();
            menu_item(ui, &t!("menu.exit", locale = lang), UiEvent::Exit, events);
        });

        ui.menu_button(t!("menu.view", locale = lang).as_ref(), |ui| {
            ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
            menu_item(ui, &t!("menu.first_page", locale = lang), Action::FirstPage.into(), events);
            menu_item(ui, &t!("menu.prev_page", locale = lang), Action::PrevPage.into(), events);
            menu_item(ui, &t!("menu.next_page", locale = lang), Action::NextPage.into(), events);
            menu_item(ui, &t!("menu.last_page", locale = lang), Action::LastPage.into(), events);
            ui.separator();
            menu_item(ui, &t!("menu.zoom_in", locale = lang), Action::ZoomIn.into(), events);
            menu_item(ui, &t!("menu.zoom_out", locale = lang), Action::ZoomOut.into(), events);
            menu_item(ui, &t!("menu.actual_size", locale = lang), Action::ResetZoom.into(), events);
        });

        ui.menu_button(t!("menu.language", locale = lang).as_ref(), |ui| {
            for language in Language::ALL {
                if ui
                    .radio(state.language() == language, language.menu_label())
                    .clicked()
                {
                    events.push(Action::SwitchLanguage(language).into());
                    ui.close();
                }
            }
        });

        ui.menu_button(t!("menu.help", locale = lang).as_ref(), |ui| {
            ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
            menu_item(ui, &t!("menu.shortcuts", locale = lang), Action::ShowShortcuts.into(), events);
            menu_item(ui, &t!("menu.about", locale = lang), Action::ShowAbout.into(), events);
        });
    });
}
