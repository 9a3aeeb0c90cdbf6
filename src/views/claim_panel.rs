// ============================================================================
// CLAIM PANEL - Formularios del ciclo de vida del seguro
// ============================================================================
// Cada botón dispara UNA operación del viewmodel vía spawn_local. Los
// valores se leen del DOM en el momento del click, no al renderizar.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, input_value, on_click, select_value, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::default_viewmodel;

/// Renderizar los formularios de registro, reclamo y consulta
pub fn render_claim_panel(state: &AppState) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("section")?.class("claim-panel").build();

    append_child(&panel, &render_register_section(state)?)?;
    append_child(&panel, &render_claim_section(state)?)?;
    append_child(&panel, &render_device_section(state)?)?;

    Ok(panel)
}

/// Registro de un móvil: precio en ether + botón
fn render_register_section(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?.class("form-section").build();

    let label = ElementBuilder::new("label")?
        .attr("for", "price")?
        .text("Mobile price (ether)")
        .build();
    let price_input = ElementBuilder::new("input")?
        .id("price")?
        .attr("type", "text")?
        .attr("placeholder", "1")?
        .build();
    let register_btn = ElementBuilder::new("button")?
        .class("btn-register")
        .text("Register mobile")
        .build();

    {
        let state = state.clone();
        on_click(&register_btn, move |_| {
            let state = state.clone();
            let price = input_value("price");
            spawn_local(async move {
                default_viewmodel(&state).register(&price).await;
            });
        })?;
    }

    append_child(&section, &label)?;
    append_child(&section, &price_input)?;
    append_child(&section, &register_btn)?;
    Ok(section)
}

/// Presentar y ejecutar reclamos
fn render_claim_section(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?.class("form-section").build();

    let label = ElementBuilder::new("label")?
        .attr("for", "claim-type")?
        .text("Claim type")
        .build();
    let select = ElementBuilder::new("select")?.id("claim-type")?.build();
    for (value, name) in [("0", "None"), ("1", "Loss"), ("2", "Damage")] {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(name)
            .build();
        append_child(&select, &option)?;
    }

    let create_btn = ElementBuilder::new("button")?
        .class("btn-create-claim")
        .text("Create claim")
        .build();
    let execute_btn = ElementBuilder::new("button")?
        .class("btn-execute-claim")
        .text("Execute claim")
        .build();

    {
        let state = state.clone();
        on_click(&create_btn, move |_| {
            let state = state.clone();
            // El contrato valida el tipo; aquí solo se parsea el select
            let claim_type = select_value("claim-type").parse::<u8>().unwrap_or(0);
            spawn_local(async move {
                default_viewmodel(&state).create_claim(claim_type).await;
            });
        })?;
    }
    {
        let state = state.clone();
        on_click(&execute_btn, move |_| {
            let state = state.clone();
            spawn_local(async move {
                default_viewmodel(&state).execute_claim().await;
            });
        })?;
    }

    append_child(&section, &label)?;
    append_child(&section, &select)?;
    append_child(&section, &create_btn)?;
    append_child(&section, &execute_btn)?;
    Ok(section)
}

/// Consulta/aceptación por dirección de móvil + reporte renderizado
fn render_device_section(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?.class("form-section").build();

    let label = ElementBuilder::new("label")?
        .attr("for", "address")?
        .text("Mobile address")
        .build();
    let address_input = ElementBuilder::new("input")?
        .id("address")?
        .attr("type", "text")?
        .attr("placeholder", "0x…")?
        .build();
    let accept_btn = ElementBuilder::new("button")?
        .class("btn-accept-claim")
        .text("Accept claim")
        .build();
    let status_btn = ElementBuilder::new("button")?
        .class("btn-get-status")
        .text("Get status")
        .build();

    {
        let state = state.clone();
        on_click(&accept_btn, move |_| {
            let state = state.clone();
            let address = input_value("address");
            spawn_local(async move {
                default_viewmodel(&state).accept_claim(&address).await;
            });
        })?;
    }
    {
        let state = state.clone();
        on_click(&status_btn, move |_| {
            let state = state.clone();
            let address = input_value("address");
            spawn_local(async move {
                default_viewmodel(&state).get_status(&address).await;
            });
        })?;
    }

    append_child(&section, &label)?;
    append_child(&section, &address_input)?;
    append_child(&section, &accept_btn)?;
    append_child(&section, &status_btn)?;

    // Último reporte consultado (si hay)
    if let Some(report) = state.device_report.borrow().clone() {
        let report_block = ElementBuilder::new("div")?.class("device-report").build();
        let address = ElementBuilder::new("div")?
            .id("claim-address")?
            .text(&report.address)
            .build();
        let price = ElementBuilder::new("div")?
            .id("claim-price")?
            .text(&format!("Price paid: {} wei", report.price_wei))
            .build();
        let status = ElementBuilder::new("div")?
            .id("claim-status")?
            .text(report.claim_status.label())
            .build();
        append_child(&report_block, &address)?;
        append_child(&report_block, &price)?;
        append_child(&report_block, &status)?;
        append_child(&section, &report_block)?;
    }

    Ok(section)
}
