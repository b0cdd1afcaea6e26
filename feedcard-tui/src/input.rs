use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::card::{DeletePhase, PendingAction, PostCard};
use crate::clipboard::Clipboard;

/// What the event loop should do after a key press
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    /// Send this request and feed the outcome back to the card
    Dispatch(PendingAction),
}

/// Route a key press to the card.
///
/// The delete confirmation captures y/n/Esc while open. With the comments
/// panel open, printable keys edit the draft and Enter submits it.
pub fn handle_key(
    post_card: &mut PostCard,
    key: KeyEvent,
    clipboard: &mut dyn Clipboard,
    now: Instant,
) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    if !post_card.is_visible() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Continue,
        };
    }

    if matches!(post_card.delete_phase(), DeletePhase::ConfirmPending { .. }) {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => dispatch(post_card.begin_delete()),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                post_card.cancel_delete();
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        };
    }

    if post_card.comments_panel_open() {
        // Ctrl keeps like and share reachable while typing
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('l') => dispatch(post_card.begin_like()),
                KeyCode::Char('s') => {
                    post_card.share_link(clipboard, now);
                    KeyOutcome::Continue
                }
                _ => KeyOutcome::Continue,
            };
        }

        return match key.code {
            KeyCode::Enter => dispatch(post_card.begin_comment()),
            KeyCode::Backspace => {
                post_card.pop_draft_char();
                KeyOutcome::Continue
            }
            KeyCode::Esc => {
                post_card.toggle_comments();
                KeyOutcome::Continue
            }
            KeyCode::Char(c) => {
                post_card.push_draft_char(c);
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        };
    }

    match key.code {
        KeyCode::Char('l') => dispatch(post_card.begin_like()),
        KeyCode::Char('c') => {
            post_card.toggle_comments();
            KeyOutcome::Continue
        }
        KeyCode::Char('s') => {
            post_card.share_link(clipboard, now);
            KeyOutcome::Continue
        }
        KeyCode::Char('d') => {
            post_card.request_delete();
            KeyOutcome::Continue
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
        _ => KeyOutcome::Continue,
    }
}

fn dispatch(action: Option<PendingAction>) -> KeyOutcome {
    action.map_or(KeyOutcome::Continue, KeyOutcome::Dispatch)
}
