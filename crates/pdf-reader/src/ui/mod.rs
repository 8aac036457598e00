pub mod canvas;
pub mod dialogs;
pub mod fonts;
pub mod menu;
pub mod shortcuts;
pub mod tab_bar;
pub mod toolbar;

use crate::shell::Action;

/// Output of one frame of widgets. File dialogs and window control are
/// resolved by the app before anything reaches the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Action(Action),
    PickFileToOpen,
    PickSaveDestination,
    Exit,
}

impl From<Action> for UiEvent {
    fn from(action: Action) -> Self {
        UiEvent::Action(action)
    }
}
