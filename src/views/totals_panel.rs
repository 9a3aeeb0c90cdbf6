// ============================================================================
// TOTALS PANEL - Contadores agregados del contrato
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;

fn render_counter(class: &str, label: &str, value: &str) -> Result<Element, JsValue> {
    let item = ElementBuilder::new("div")?.class("totals-item").build();
    let caption = ElementBuilder::new("span")?
        .class("totals-label")
        .text(label)
        .build();
    let amount = ElementBuilder::new("span")?.class(class).text(value).build();
    append_child(&item, &caption)?;
    append_child(&item, &amount)?;
    Ok(item)
}

/// Renderizar los totales (último snapshot publicado)
pub fn render_totals_panel(state: &AppState) -> Result<Element, JsValue> {
    let totals = state.totals.current();

    let panel = ElementBuilder::new("section")?.class("totals-panel").build();
    append_child(
        &panel,
        &render_counter("total-users", "Users", &totals.total_users.to_string())?,
    )?;
    append_child(
        &panel,
        &render_counter("total-balance", "Balance (wei)", &totals.total_balance)?,
    )?;
    append_child(
        &panel,
        &render_counter("total-claims", "Claims", &totals.total_claims.to_string())?,
    )?;

    Ok(panel)
}
