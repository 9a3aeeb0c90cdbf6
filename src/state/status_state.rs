// ============================================================================
// STATUS STATE - Canal de estado (un único mensaje visible)
// ============================================================================
// Invariante: exactamente uno de {info, error, vacío} está visible.
// Ninguna operación deja info y error poblados a la vez.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::status::StatusMessage;
use crate::services::revert;

/// Canal del mensaje de estado visible
#[derive(Clone)]
pub struct StatusState {
    message: Rc<RefCell<StatusMessage>>,
}

impl StatusState {
    pub fn new() -> Self {
        Self {
            message: Rc::new(RefCell::new(StatusMessage::Empty)),
        }
    }

    /// Mensaje visible actual
    pub fn current(&self) -> StatusMessage {
        self.message.borrow().clone()
    }

    /// Mostrar mensaje informativo (limpia cualquier error visible)
    pub fn set_status(&self, text: impl Into<String>) {
        *self.message.borrow_mut() = StatusMessage::Info(text.into());
    }

    /// Mostrar error (limpia cualquier info visible).
    /// El mensaje pasa por el decoder de reverts; si no es decodificable
    /// se muestra el texto crudo tal cual.
    pub fn set_error(&self, code: i64, message: &str, stack: Option<String>) {
        let reason = revert::decode_or_fallback(message);
        *self.message.borrow_mut() = StatusMessage::Error {
            code,
            reason,
            raw: message.to_string(),
            stack,
        };
    }

    /// Volver al estado vacío
    pub fn reset(&self) {
        *self.message.borrow_mut() = StatusMessage::Empty;
    }
}

impl Default for StatusState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_status_clears_error() {
        let status = StatusState::new();
        status.set_error(4001, "User rejected the request", None);
        assert!(status.current().is_error());

        status.set_status("Mobile registered");
        let current = status.current();
        assert!(current.is_info());
        assert!(!current.is_error());
        assert_eq!(current, StatusMessage::Info("Mobile registered".to_string()));
    }

    #[test]
    fn set_error_clears_status() {
        let status = StatusState::new();
        status.set_status("Initiating transaction... (please wait)");
        status.set_error(-32000, "boom", Some("at send".to_string()));

        let current = status.current();
        assert!(current.is_error());
        assert!(!current.is_info());
    }

    #[test]
    fn set_error_decodes_embedded_revert_reason() {
        let status = StatusState::new();
        let raw = r#"reverted: {"data":{"data":{"0x01":{"reason":"device not registered"}}}}"#;
        status.set_error(-32000, raw, None);

        match status.current() {
            StatusMessage::Error { code, reason, raw: detail, .. } => {
                assert_eq!(code, -32000);
                assert_eq!(reason, "device not registered");
                assert_eq!(detail, raw);
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn set_error_falls_back_to_raw_message() {
        let status = StatusState::new();
        status.set_error(4001, "User rejected the request", None);

        match status.current() {
            StatusMessage::Error { reason, .. } => {
                assert_eq!(reason, "User rejected the request");
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let status = StatusState::new();
        status.set_status("working...");
        status.reset();
        assert!(status.current().is_empty());

        // Segundo reset: mismo resultado
        status.reset();
        assert!(status.current().is_empty());
    }
}
