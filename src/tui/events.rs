use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState, SettingsItem, COLOR_STEP};
use crate::{Category, QuoteSource};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event<S>(event: Event, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    let Event::Key(key_event) = event else {
        return;
    };
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    if key_event.modifiers == KeyModifiers::CONTROL && key_event.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // An open share popup swallows the next key.
    if state.share_text.is_some() {
        state.share_text = None;
        return;
    }

    if !state.picker_open {
        match key_event.code {
            KeyCode::Char('q') => {
                state.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                let next = (state.screen.tab_index() + 1) % AppScreen::TABS.len();
                state.switch_to(AppScreen::TABS[next]);
                return;
            }
            KeyCode::BackTab => {
                let len = AppScreen::TABS.len();
                let prev = (state.screen.tab_index() + len - 1) % len;
                state.switch_to(AppScreen::TABS[prev]);
                return;
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                state.switch_to(AppScreen::TABS[idx]);
                return;
            }
            _ => {}
        }
    }

    match state.screen {
        AppScreen::Home => handle_home(key_event, state),
        AppScreen::Settings => handle_settings(key_event, state),
        AppScreen::Notifications => handle_notifications(key_event, state),
        AppScreen::Favorites => handle_favorites(key_event, state),
    }
}

fn handle_home<S>(event: KeyEvent, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    match event.code {
        KeyCode::Char('r') | KeyCode::Char('n') => state.request_quote(),
        KeyCode::Char('f') => state.favorite_current(Instant::now()),
        KeyCode::Char('s') => state.share_current(),
        _ => {}
    }
}

fn handle_settings<S>(event: KeyEvent, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    if state.picker_open {
        handle_category_picker(event, state);
        return;
    }

    match event.code {
        KeyCode::Up => {
            if state.settings_selection > 0 {
                state.settings_selection -= 1;
            }
        }
        KeyCode::Down => {
            if state.settings_selection < SettingsItem::ALL.len() - 1 {
                state.settings_selection += 1;
            }
        }
        KeyCode::Left | KeyCode::Char('-') => match state.selected_setting() {
            SettingsItem::QuoteType => state.cycle_category(-1),
            item @ (SettingsItem::Red | SettingsItem::Green | SettingsItem::Blue) => {
                state.adjust_color(item, -COLOR_STEP)
            }
            _ => {}
        },
        KeyCode::Right | KeyCode::Char('+') => match state.selected_setting() {
            SettingsItem::QuoteType => state.cycle_category(1),
            item @ (SettingsItem::Red | SettingsItem::Green | SettingsItem::Blue) => {
                state.adjust_color(item, COLOR_STEP)
            }
            _ => {}
        },
        KeyCode::Enter | KeyCode::Char(' ') => match state.selected_setting() {
            SettingsItem::QuoteType => state.open_picker(),
            SettingsItem::LargerFont => state.toggle_larger_font(),
            SettingsItem::CustomFontColor => state.toggle_custom_font_color(),
            SettingsItem::Notifications => state.switch_to(AppScreen::Notifications),
            SettingsItem::Red | SettingsItem::Green | SettingsItem::Blue => {}
        },
        _ => {}
    }
}

fn handle_category_picker<S>(event: KeyEvent, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    match event.code {
        KeyCode::Up => {
            if state.picker_selection > 0 {
                state.picker_selection -= 1;
            }
        }
        KeyCode::Down => {
            if state.picker_selection < Category::ALL.len() - 1 {
                state.picker_selection += 1;
            }
        }
        KeyCode::Enter => {
            state.pick_category(Category::ALL[state.picker_selection]);
            state.picker_open = false;
        }
        KeyCode::Esc => {
            state.picker_open = false;
        }
        _ => {}
    }
}

fn handle_notifications<S>(event: KeyEvent, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    match event.code {
        KeyCode::Enter | KeyCode::Char(' ') => state.toggle_notifs(),
        KeyCode::Esc | KeyCode::Backspace => state.switch_to(AppScreen::Settings),
        _ => {}
    }
}

fn handle_favorites<S>(event: KeyEvent, state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    match event.code {
        KeyCode::Up => {
            if state.selected_favorite > 0 {
                state.selected_favorite -= 1;
            }
        }
        KeyCode::Down => {
            if state.selected_favorite < state.favorites.len().saturating_sub(1) {
                state.selected_favorite += 1;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if !state.favorites.is_empty() {
                state.delete_selected_favorite();
            }
        }
        KeyCode::Char('s') | KeyCode::Enter => state.share_selected_favorite(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Favorites, Quote, QuotelyError, Store};

    struct NoNetwork;

    impl QuoteSource for NoNetwork {
        fn random(&self, _tag: &str) -> crate::Result<Vec<Quote>> {
            Err(QuotelyError::Http {
                status: 503,
                message: "offline".into(),
            })
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state_with_favorites(pairs: &[(&str, &str)]) -> AppState<NoNetwork> {
        let mut store = Store::in_memory();
        for (text, author) in pairs {
            Favorites::new(&mut store).append(text, author).unwrap();
        }
        AppState::new(store, NoNetwork)
    }

    #[test]
    fn tab_cycles_top_level_screens() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Tab), &mut state);
        assert_eq!(state.screen, AppScreen::Settings);
        handle_event(key(KeyCode::Tab), &mut state);
        assert_eq!(state.screen, AppScreen::Favorites);
        handle_event(key(KeyCode::Tab), &mut state);
        assert_eq!(state.screen, AppScreen::Home);
    }

    #[test]
    fn delete_removes_selected_pair() {
        let mut state = state_with_favorites(&[("q1", "a1"), ("q2", "a2"), ("q3", "a3")]);
        handle_event(key(KeyCode::Char('3')), &mut state);
        assert_eq!(state.favorites.len(), 3);

        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Char('d')), &mut state);

        let texts: Vec<_> = state.favorites.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["q1", "q3"]);
        assert_eq!(Favorites::new(&mut state.store).load(), ["q1", "a1", "q3", "a3"]);
    }

    #[test]
    fn deleting_last_row_moves_selection_up() {
        let mut state = state_with_favorites(&[("q1", "a1"), ("q2", "a2")]);
        handle_event(key(KeyCode::Char('3')), &mut state);
        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Delete), &mut state);
        assert_eq!(state.selected_favorite, 0);
        assert_eq!(state.favorites.len(), 1);
    }

    #[test]
    fn picker_writes_quote_type() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Char('2')), &mut state);
        handle_event(key(KeyCode::Enter), &mut state);
        assert!(state.picker_open);

        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Enter), &mut state);

        assert!(!state.picker_open);
        assert_eq!(state.prefs.quote_type, 3);
        assert_eq!(state.store.int(crate::keys::QUOTE_TYPE), Some(3));
        assert_eq!(state.prefs.tag(), "art");
    }

    #[test]
    fn left_wraps_category() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Char('2')), &mut state);
        handle_event(key(KeyCode::Left), &mut state);
        assert_eq!(state.prefs.category(), Some(Category::Success));
    }

    #[test]
    fn toggles_and_color_adjusters_persist() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Char('2')), &mut state);

        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Char(' ')), &mut state);
        assert!(state.prefs.larger_font);

        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Down), &mut state);
        handle_event(key(KeyCode::Left), &mut state);
        assert!((state.prefs.font_color.r - 0.95).abs() < 1e-9);
        handle_event(key(KeyCode::Right), &mut state);
        handle_event(key(KeyCode::Right), &mut state);
        assert_eq!(state.prefs.font_color.r, 1.0);

        let reloaded = crate::Preferences::load(&state.store);
        assert_eq!(reloaded, state.prefs);
    }

    #[test]
    fn notifications_screen_toggles_and_returns() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Char('2')), &mut state);
        for _ in 0..SettingsItem::ALL.len() {
            handle_event(key(KeyCode::Down), &mut state);
        }
        handle_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.screen, AppScreen::Notifications);

        handle_event(key(KeyCode::Enter), &mut state);
        assert!(state.prefs.notifs);

        handle_event(key(KeyCode::Esc), &mut state);
        assert_eq!(state.screen, AppScreen::Settings);
    }

    #[test]
    fn favoriting_empty_quote_is_ignored() {
        let mut state = state_with_favorites(&[]);
        handle_event(key(KeyCode::Char('f')), &mut state);
        assert!(state.info_bubble_until.is_none());
        assert!(Favorites::new(&mut state.store).load().is_empty());
    }

    #[test]
    fn share_popup_closes_on_next_key() {
        let mut state = state_with_favorites(&[("Be yourself.", "Oscar Wilde")]);
        handle_event(key(KeyCode::Char('3')), &mut state);
        handle_event(key(KeyCode::Char('s')), &mut state);
        assert_eq!(
            state.share_text.as_deref(),
            Some("\"Be yourself.\" - Oscar Wilde")
        );
        handle_event(key(KeyCode::Char('q')), &mut state);
        assert!(state.share_text.is_none());
        assert!(!state.should_quit);
    }
}
