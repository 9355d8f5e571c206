//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, GridMove, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return false;
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return false;
        }
        AppState::LookingUp => {
            handle_lookup_input(app, key);
            return false;
        }
        AppState::Quitting => return true,
        AppState::Normal => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return false;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return false;
        }
        KeyCode::Char('1') => {
            app.current_tab = Tab::Cards;
            return false;
        }
        KeyCode::Char('2') => {
            switch_to_pokemon(app);
            return false;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let target = if key.code == KeyCode::Tab {
                app.current_tab.next()
            } else {
                app.current_tab.prev()
            };
            match target {
                Tab::Pokemon => switch_to_pokemon(app),
                Tab::Cards => app.current_tab = Tab::Cards,
            }
            return false;
        }
        _ => {}
    }

    match app.current_tab {
        Tab::Cards => handle_cards_input(app, key),
        Tab::Pokemon => handle_pokemon_input(app, key),
    }

    false
}

/// Switch tabs and load the list the first time the tab is shown
fn switch_to_pokemon(app: &mut App) {
    app.current_tab = Tab::Pokemon;
    if app.pokemon.is_empty() {
        app.load_pokemon_background(false);
    }
}

fn handle_cards_input(app: &mut App, key: KeyEvent) {
    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('k') => GridMove::Up,
        KeyCode::Down | KeyCode::Char('j') => GridMove::Down,
        KeyCode::Left | KeyCode::Char('h') => GridMove::Left,
        KeyCode::Right | KeyCode::Char('l') => GridMove::Right,
        _ => return,
    };
    app.move_card_selection(direction);
}

fn handle_pokemon_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_pokemon(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_pokemon(),
        KeyCode::Char('u') => app.load_pokemon_background(true),
        KeyCode::Char('/') => app.start_lookup(),
        _ => {}
    }
}

fn handle_lookup_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.lookup_input.clear();
        }
        KeyCode::Enter => app.submit_lookup(),
        KeyCode::Backspace => {
            app.lookup_input.pop();
        }
        KeyCode::Char(c) => app.push_lookup_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use pokegrid_core::{PokeApiClient, PokemonQueries};

    fn app() -> App {
        let api = PokeApiClient::with_base_url("http://127.0.0.1:9").unwrap();
        App::with_queries(PokemonQueries::new(api))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut app = app();
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q')));
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::ShowingHelp);
        handle_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_arrows_move_card_selection() {
        let mut app = app();
        handle_input(&mut app, key(KeyCode::Right));
        handle_input(&mut app, key(KeyCode::Down));
        assert_eq!(app.card_selection, 1 + crate::app::GRID_COLUMNS);
    }

    #[test]
    fn test_lookup_typing() {
        let mut app = app();
        app.current_tab = Tab::Pokemon;
        handle_input(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.state, AppState::LookingUp);

        for c in "pikachuq".chars() {
            handle_input(&mut app, key(KeyCode::Char(c)));
        }
        handle_input(&mut app, key(KeyCode::Backspace));
        // 'q' is plain text while the prompt is open
        assert_eq!(app.lookup_input, "pikachu");
        assert_eq!(app.state, AppState::LookingUp);

        handle_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Normal);
        assert!(app.lookup_input.is_empty());
    }
}
