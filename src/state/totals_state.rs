// ============================================================================
// TOTALS STATE - Último snapshot de totales publicado
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::totals::Totals;

/// Último snapshot de los contadores agregados del contrato
#[derive(Clone)]
pub struct TotalsState {
    totals: Rc<RefCell<Totals>>,
}

impl TotalsState {
    pub fn new() -> Self {
        Self {
            totals: Rc::new(RefCell::new(Totals::default())),
        }
    }

    pub fn current(&self) -> Totals {
        self.totals.borrow().clone()
    }

    /// Publicar un snapshot recién leído del contrato (sin caché)
    pub fn set(&self, totals: Totals) {
        *self.totals.borrow_mut() = totals;
    }
}

impl Default for TotalsState {
    fn default() -> Self {
        Self::new()
    }
}
