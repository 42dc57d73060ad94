use super::action::Action;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriggerError {
    #[error("invalid key binding `{0}`: expected modifier+letter, e.g. `ctrl+j`")]
    InvalidBinding(String),
}

/// A modifier+letter combination such as `ctrl+j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub letter: char,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let KeyCode::Char(c) = key.code else {
            return false;
        };
        if !c.eq_ignore_ascii_case(&self.letter) {
            return false;
        }
        // Caps lock and shifted letters still count unless shift is part of the binding.
        let pressed = if self.modifiers.contains(KeyModifiers::SHIFT) {
            key.modifiers
        } else {
            key.modifiers.difference(KeyModifiers::SHIFT)
        };
        pressed == self.modifiers
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        Self {
            modifiers: KeyModifiers::CONTROL,
            letter: 'j',
        }
    }
}

impl FromStr for KeyBinding {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TriggerError::InvalidBinding(s.to_string());
        let parts: Vec<String> = s.split('+').map(|p| p.trim().to_lowercase()).collect();
        let (letter, mods) = parts.split_last().ok_or_else(invalid)?;

        let mut chars = letter.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => return Err(invalid()),
        };

        let mut modifiers = KeyModifiers::empty();
        for m in mods {
            modifiers |= match m.as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" | "meta" => KeyModifiers::ALT,
                "super" | "cmd" | "command" => KeyModifiers::SUPER,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }
        if modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return Err(invalid());
        }
        Ok(Self { modifiers, letter })
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, label) in [
            (KeyModifiers::CONTROL, "CTRL"),
            (KeyModifiers::ALT, "ALT"),
            (KeyModifiers::SUPER, "CMD"),
            (KeyModifiers::SHIFT, "SHIFT"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{label} + ")?;
            }
        }
        write!(f, "{}", self.letter.to_ascii_uppercase())
    }
}

/// Global shortcuts for the overlay. Checked before anything else so a
/// handled key never reaches the query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerBinding {
    pub toggle: KeyBinding,
}

impl TriggerBinding {
    pub fn new(toggle: KeyBinding) -> Self {
        Self { toggle }
    }

    #[must_use]
    pub fn resolve(&self, key: &KeyEvent, open: bool) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if self.toggle.matches(key) {
            return Some(Action::ToggleOverlay);
        }
        if open && key.code == KeyCode::Esc {
            return Some(Action::CloseOverlay);
        }
        None
    }
}

/// Where terminal events come from.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout` for the next event.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// The session's one key-event subscription. Dropping it stops the reader
/// within one poll interval and releases the channel.
#[derive(Debug)]
pub struct KeyListener {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyListener {
    pub fn install<S: EventSource>(
        mut source: S,
        tx: mpsc::Sender<io::Result<Event>>,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = shutdown.clone();
        let handle = tokio::task::spawn_blocking(move || {
            while !stop.load(Ordering::Acquire) {
                match source.poll(POLL_INTERVAL) {
                    Ok(Some(evt)) => {
                        if tx.blocking_send(Ok(evt)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        let _ = tx.blocking_send(Err(e));
                        break;
                    }
                }
            }
            tracing::debug!("key listener stopped");
        });
        tracing::debug!("key listener installed");
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the reader and waits for it to exit.
    pub async fn uninstall(mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_parse_bindings() {
        assert_eq!(
            "ctrl+j".parse::<KeyBinding>().unwrap(),
            KeyBinding::default()
        );
        let b: KeyBinding = "Alt + K".parse().unwrap();
        assert_eq!(b.modifiers, KeyModifiers::ALT);
        assert_eq!(b.letter, 'k');

        for bad in ["j", "ctrl+", "ctrl+jj", "hyper+j", "shift+j", "ctrl+1", ""] {
            assert!(bad.parse::<KeyBinding>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyBinding::default().to_string(), "CTRL + J");
    }

    #[test]
    fn test_toggle_resolves_in_any_state() {
        let trigger = TriggerBinding::default();
        assert_eq!(trigger.resolve(&ctrl('j'), false), Some(Action::ToggleOverlay));
        assert_eq!(trigger.resolve(&ctrl('j'), true), Some(Action::ToggleOverlay));
        assert_eq!(
            trigger.resolve(
                &KeyEvent::new(
                    KeyCode::Char('J'),
                    KeyModifiers::CONTROL | KeyModifiers::SHIFT
                ),
                false
            ),
            Some(Action::ToggleOverlay)
        );
    }

    #[test]
    fn test_plain_letter_is_not_a_trigger() {
        let trigger = TriggerBinding::default();
        let plain = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(trigger.resolve(&plain, true), None);
        assert_eq!(trigger.resolve(&ctrl('k'), true), None);
        let alt = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::ALT);
        assert_eq!(trigger.resolve(&alt, true), None);
    }

    #[test]
    fn test_escape_only_closes_when_open() {
        let trigger = TriggerBinding::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(trigger.resolve(&esc, true), Some(Action::CloseOverlay));
        assert_eq!(trigger.resolve(&esc, false), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let trigger = TriggerBinding::default();
        let mut key = ctrl('j');
        key.kind = KeyEventKind::Release;
        assert_eq!(trigger.resolve(&key, false), None);
    }

    fn scripted_source(first: Event) -> MockEventSource {
        let mut mock = MockEventSource::new();
        let mut pending = Some(first);
        mock.expect_poll().returning(move |timeout| {
            if let Some(evt) = pending.take() {
                return Ok(Some(evt));
            }
            std::thread::sleep(timeout.min(Duration::from_millis(5)));
            Ok(None)
        });
        mock
    }

    #[tokio::test]
    async fn test_listener_forwards_events_until_uninstalled() {
        let (tx, mut rx) = mpsc::channel(8);
        let listener = KeyListener::install(scripted_source(Event::Key(ctrl('j'))), tx);
        assert!(listener.is_active());

        let evt = rx.recv().await.unwrap().unwrap();
        assert_eq!(evt, Event::Key(ctrl('j')));

        listener.uninstall().await;
        assert!(rx.recv().await.is_none(), "sender must be released");
    }

    #[tokio::test]
    async fn test_dropping_listener_releases_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        let listener = KeyListener::install(scripted_source(Event::FocusGained), tx);
        assert_eq!(rx.recv().await.unwrap().unwrap(), Event::FocusGained);

        drop(listener);
        let closed = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }

    #[tokio::test]
    async fn test_source_error_is_forwarded() {
        let mut mock = MockEventSource::new();
        mock.expect_poll()
            .returning(|_| Err(io::Error::new(io::ErrorKind::Other, "tty gone")));
        let (tx, mut rx) = mpsc::channel(8);
        let _listener = KeyListener::install(mock, tx);

        let err = rx.recv().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
        assert!(rx.recv().await.is_none());
    }
}
