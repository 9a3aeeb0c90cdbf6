// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::claim::DeviceReport;
use crate::state::{SessionState, StatusState, TotalsState};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub status: StatusState,
    pub totals: TotalsState,

    /// Resultado de la última consulta getStatus (móvil + reclamo)
    pub device_report: Rc<RefCell<Option<DeviceReport>>>,

    /// Flag de serialización: una sola operación de ciclo de vida en
    /// vuelo; una segunda se rechaza sin tocar el contrato
    pub tx_in_flight: Rc<RefCell<bool>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            status: StatusState::new(),
            totals: TotalsState::new(),
            device_report: Rc::new(RefCell::new(None)),
            tx_in_flight: Rc::new(RefCell::new(false)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
