// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::{BrowserWallet, WalletProvider};
use crate::state::AppState;
use crate::viewmodels::default_viewmodel;
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Option<Element>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Re-renderizar automáticamente ante cambios de estado
        state.subscribe_to_changes(move || {
            crate::rerender_app();
        });

        Ok(Self {
            state,
            root: Some(root),
        })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        if let Some(root) = &self.root {
            // Limpiar contenido anterior
            set_inner_html(root, "");

            let app_view = render_app(&self.state)?;
            append_child(root, &app_view)?;
        }
        Ok(())
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Arranque de sesión: resolver cuenta del wallet, suscribirse al
/// cambio de cuentas y leer los totales iniciales. Un fallo aquí es
/// fatal para la sesión: se diagnostica por log y la app queda a la
/// espera de un reload.
pub async fn bootstrap_session(state: AppState) {
    let wallet = BrowserWallet::new();

    match wallet.current_account().await {
        Ok(account) => {
            state.session.set_active_account(account);

            // La notificación de cambio de cuenta solo muta la sesión;
            // una operación en vuelo sigue con la cuenta que capturó
            let session = state.session.clone();
            if let Err(e) = wallet.on_accounts_changed(Box::new(move |account| {
                session.set_active_account(account);
            })) {
                log::warn!("⚠️ Sin suscripción a accountsChanged: {}", e);
            }
        }
        Err(e) => {
            log::error!("Could not connect to contract or chain.");
            log::error!("❌ {}", e);
            return;
        }
    }

    // Totales iniciales
    if let Err(failure) = default_viewmodel(&state).refresh_totals().await {
        log::error!("Could not connect to contract or chain.");
        log::error!("❌ {}", failure.message);
    }
}
