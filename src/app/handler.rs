//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::newsletter::SubmitStatus;

use super::state::{ActiveView, AppState};

/// Lines moved per page-up / page-down.
const PAGE_LINES: f64 = 10.0;
/// Lines moved per mouse-wheel notch.
const WHEEL_LINES: f64 = 3.0;
/// Longest address the form accepts.
const MAX_EMAIL_LEN: usize = 254;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::Newsletter => handle_newsletter_key(state, key),
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            let pos = state.scroll_position();
            state.scroll_by(-pos);
            return;
        }
        KeyCode::End => {
            state.scroll_by(state.page_len as f64);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll_by(-1.0),
        Action::ScrollDown => state.scroll_by(1.0),
        Action::PageUp => state.scroll_by(-PAGE_LINES),
        Action::PageDown => state.scroll_by(PAGE_LINES),
        Action::ToggleMarquees => {
            if state.marquees_mounted() {
                state.unmount_marquees();
                state.status_message = Some("Marquees unmounted".into());
            } else {
                state.mount_marquees();
                state.status_message = Some("Marquees mounted".into());
            }
        }
        Action::OpenNewsletter => {
            state.active_view = ActiveView::Newsletter;
            if !state.newsletter.status.is_sending() {
                state.newsletter.status = SubmitStatus::Idle;
            }
        }
    }
}

// ── Newsletter form (fixed keys) ────────────────────────────────

fn handle_newsletter_key(state: &mut AppState, key: KeyEvent) {
    let form = &mut state.newsletter;
    match key.code {
        KeyCode::Esc => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Enter => {
            if form.status.is_sending() {
                return;
            }
            form.status = SubmitStatus::Sending;
            state.pending_submission = Some(form.email.clone());
        }
        KeyCode::Backspace => {
            form.email.pop();
            clear_feedback(&mut form.status);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if form.email.chars().count() < MAX_EMAIL_LEN && !c.is_control() {
                form.email.push(c);
                clear_feedback(&mut form.status);
            }
        }
        _ => {}
    }
}

/// Editing the address dismisses the previous outcome, but not an
/// in-flight submission.
fn clear_feedback(status: &mut SubmitStatus) {
    if !status.is_sending() {
        *status = SubmitStatus::Idle;
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Page {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_by(-WHEEL_LINES),
        MouseEventKind::ScrollDown => state.scroll_by(WHEEL_LINES),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), vec!["Brand".into()], 100)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_scroll_keys_publish_positions() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.scroll_position(), 2.0);
        press(&mut s, KeyCode::PageDown);
        assert_eq!(s.scroll_position(), 12.0);
        press(&mut s, KeyCode::Up);
        assert_eq!(s.scroll_position(), 11.0);
        press(&mut s, KeyCode::Home);
        assert_eq!(s.scroll_position(), 0.0);
        press(&mut s, KeyCode::End);
        assert_eq!(s.scroll_position(), 99.0);
    }

    #[test]
    fn test_scroll_direction_reaches_marquee() {
        let mut s = state();
        press(&mut s, KeyCode::PageDown);
        press(&mut s, KeyCode::Up);
        s.on_frame();
        assert_eq!(s.marquees[0].animator().offset(), -0.5);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut s = state();
        handle_mouse(&mut s, wheel(MouseEventKind::ScrollDown));
        assert_eq!(s.scroll_position(), 3.0);
        handle_mouse(&mut s, wheel(MouseEventKind::ScrollUp));
        assert_eq!(s.scroll_position(), 0.0);
    }

    #[test]
    fn test_toggle_marquees() {
        let mut s = state();
        press(&mut s, KeyCode::Char('m'));
        assert!(!s.marquees_mounted());
        assert_eq!(s.scroll.subscriber_count(), 0);
        press(&mut s, KeyCode::Char('m'));
        assert!(s.marquees_mounted());
    }

    #[test]
    fn test_newsletter_typing_and_submit() {
        let mut s = state();
        press(&mut s, KeyCode::Char('n'));
        assert_eq!(s.active_view, ActiveView::Newsletter);

        for c in "ada.jq@x.iox".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Backspace);
        // 'q' and 'j' are plain text inside the form.
        assert_eq!(s.newsletter.email, "ada.jq@x.io");
        assert!(!s.should_quit);

        press(&mut s, KeyCode::Enter);
        assert_eq!(s.newsletter.status, SubmitStatus::Sending);
        assert_eq!(s.pending_submission.as_deref(), Some("ada.jq@x.io"));

        // A second Enter while sending is ignored.
        s.pending_submission = None;
        press(&mut s, KeyCode::Enter);
        assert!(s.pending_submission.is_none());

        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Page);
    }

    #[test]
    fn test_editing_clears_previous_outcome() {
        let mut s = state();
        s.active_view = ActiveView::Newsletter;
        s.newsletter.status = SubmitStatus::Failed("nope".into());
        press(&mut s, KeyCode::Char('a'));
        assert_eq!(s.newsletter.status, SubmitStatus::Idle);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut s = state();
        s.active_view = ActiveView::Newsletter;
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut s = state();
        let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        handle_key(&mut s, release);
        assert_eq!(s.scroll_position(), 0.0);
    }
}
