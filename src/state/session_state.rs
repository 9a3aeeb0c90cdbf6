// ============================================================================
// SESSION STATE - Cuenta activa de la sesión
// ============================================================================
// Se crea una sola vez al arrancar. La cuenta activa solo se reemplaza
// desde la notificación accountsChanged del wallet; una operación en
// vuelo sigue usando la cuenta que capturó al empezar (carrera aceptada).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Estado de sesión: cuenta activa del wallet
#[derive(Clone)]
pub struct SessionState {
    active_account: Rc<RefCell<Option<String>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            active_account: Rc::new(RefCell::new(None)),
        }
    }

    pub fn active_account(&self) -> Option<String> {
        self.active_account.borrow().clone()
    }

    /// Punto de mutación único: handler de accountsChanged y arranque
    pub fn set_active_account(&self, account: Option<String>) {
        log::info!("👤 Cuenta activa: {:?}", account);
        *self.active_account.borrow_mut() = account;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
