use crate::shell::Action;
use eframe::egui::{self, Key, Modifiers};

/// Global key table. Page keys are ignored while a text field has focus.
pub fn action_for_key(key: Key, modifiers: Modifiers, text_focused: bool) -> Option<Action> {
    if modifiers.command && key == Key::W {
        return Some(Action::CloseActiveTab);
    }

    if text_focused || modifiers.command || modifiers.alt {
        return None;
    }

    match key {
        Key::ArrowLeft | Key::PageUp => Some(Action::PrevPage),
        Key::ArrowRight | Key::PageDown | Key::Space => Some(Action::NextPage),
        Key::Home => Some(Action::FirstPage),
        Key::End => Some(Action::LastPage),
        _ => None,
    }
}

pub fn collect_shortcuts(ctx: &egui::Context) -> Vec<Action> {
    let text_focused = ctx.wants_keyboard_input();
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => action_for_key(*key, *modifiers, text_focused),
                _ => None,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        let none = Modifiers::NONE;
        assert_eq!(action_for_key(Key::ArrowLeft, none, false), Some(Action::PrevPage));
        assert_eq!(action_for_key(Key::PageUp, none, false), Some(Action::PrevPage));
        assert_eq!(action_for_key(Key::ArrowRight, none, false), Some(Action::NextPage));
        assert_eq!(action_for_key(Key::PageDown, none, false), Some(Action::NextPage));
        assert_eq!(action_for_key(Key::Space, none, false), Some(Action::NextPage));
        assert_eq!(action_for_key(Key::Home, none, false), Some(Action::FirstPage));
        assert_eq!(action_for_key(Key::End, none, false), Some(Action::LastPage));
        assert_eq!(action_for_key(Key::A, none, false), None);
    }

    #[test]
    fn test_ctrl_w_closes_tab_even_while_typing() {
        assert_eq!(
            action_for_key(Key::W, Modifiers::COMMAND, true),
            Some(Action::CloseActiveTab)
        );
        assert_eq!(action_for_key(Key::W, Modifiers::NONE, false), None);
    }

    #[test]
    fn test_page_keys_ignored_in_text_field() {
        assert_eq!(action_for_key(Key::Space, Modifiers::NONE, true), None);
        assert_eq!(action_for_key(Key::Home, Modifiers::NONE, true), None);
    }

    #[test]
    fn test_modified_arrows_are_not_page_turns() {
        assert_eq!(action_for_key(Key::ArrowLeft, Modifiers::COMMAND, false), None);
        assert_eq!(action_for_key(Key::ArrowRight, Modifiers::ALT, false), None);
    }
}
