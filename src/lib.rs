// ============================================================================
// AMONGALL INSURANCE APP - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Ciclo de vida del seguro (register/claim/accept/execute)
// - Services: Comunicación con el contrato y el wallet
// - State: State Management con Rc<RefCell>
// - Models: Tipos del dominio (reclamo, totales, estado)
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;

// Instancia global de la app (un solo hilo en wasm)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::default());
    log::info!("🚀 AmongAll Insurance App - Rust Puro + MVVM");

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    let state = app.state().clone();

    // Guardar app en la variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Arranque asíncrono: wallet, cuenta activa y totales iniciales
    wasm_bindgen_futures::spawn_local(async move {
        app::bootstrap_session(state).await;
    });

    Ok(())
}

/// Re-renderizar la app (re-render completo)
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "❌ Error re-renderizando: {:?}",
                    e
                )));
            }
        }
    });
}
