// ============================================================================
// STATUS MESSAGE - Mensaje visible en el área de estado
// ============================================================================

/// Mensaje de estado visible para el usuario.
/// Invariante: como máximo UNO de {info, error} está visible a la vez.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    /// Sin mensaje visible
    Empty,
    /// Mensaje informativo (progreso o éxito)
    Info(String),
    /// Bloque de error con código, razón decodificada y detalle crudo
    Error {
        code: i64,
        reason: String,
        raw: String,
        stack: Option<String>,
    },
}

impl StatusMessage {
    pub fn is_empty(&self) -> bool {
        matches!(self, StatusMessage::Empty)
    }

    pub fn is_info(&self) -> bool {
        matches!(self, StatusMessage::Info(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error { .. })
    }
}
