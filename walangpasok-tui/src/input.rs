use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Start refreshing the highlighted city
    SelectCity,
    /// Re-fetch the widgets of the current screen now
    Refresh,
    /// Stop refreshing and return to the city list
    BackToCities,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::CitySelect => match key.code {
            Up | Char('k') => {
                if app.city_list_index > 0 {
                    app.city_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.city_list_index + 1 < app.cities.len() {
                    app.city_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                action = Action::SelectCity;
            }
            _ => {}
        },

        Screen::CityStatus => match key.code {
            Char('r') => {
                action = Action::Refresh;
            }
            Char('n') => {
                app.screen = Screen::News;
            }
            Left | Esc | Backspace | Char('b') => {
                action = Action::BackToCities;
            }
            _ => {}
        },

        Screen::News => match key.code {
            Char('r') => {
                action = Action::Refresh;
            }
            Left | Esc | Backspace | Char('b' | 'n') => {
                app.screen = Screen::CityStatus;
            }
            _ => {}
        },
    }
    action
}
