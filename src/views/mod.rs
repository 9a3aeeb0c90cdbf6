pub mod claim_panel;
pub mod status_panel;
pub mod totals_panel;

pub use claim_panel::render_claim_panel;
pub use status_panel::render_status_panel;
pub use totals_panel::render_totals_panel;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;

/// Renderizar la aplicación completa
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("app-container").build();

    // Header
    let header = ElementBuilder::new("header")?.class("app-header").build();
    let title = ElementBuilder::new("h1")?
        .text("AmongAll · Mobile Insurance")
        .build();
    let subtitle = ElementBuilder::new("p")?
        .class("app-subtitle")
        .text("Register your mobile, file a claim, get your payout")
        .build();
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;
    append_child(&container, &header)?;

    // Totales agregados del contrato
    append_child(&container, &render_totals_panel(state)?)?;

    // Formularios del ciclo de vida
    append_child(&container, &render_claim_panel(state)?)?;

    // Área de estado (un único mensaje visible)
    append_child(&container, &render_status_panel(state)?)?;

    Ok(container)
}
