// ============================================================================
// STATUS PANEL - Área de estado (un único mensaje visible)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::status::StatusMessage;
use crate::state::AppState;

/// Renderizar el área de estado: info, error o nada
pub fn render_status_panel(state: &AppState) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("section")?.class("status-panel").build();

    match state.status.current() {
        StatusMessage::Empty => {}
        StatusMessage::Info(text) => {
            let status = ElementBuilder::new("div")?
                .class("status-message")
                .id("status")?
                .text(&text)
                .build();
            append_child(&panel, &status)?;
        }
        StatusMessage::Error {
            code,
            reason,
            stack,
            ..
        } => {
            let error_block = ElementBuilder::new("div")?.class("error-block").build();

            let error_code = ElementBuilder::new("div")?
                .class("error-code")
                .id("error-code")?
                .text(&code.to_string())
                .build();
            let error_message = ElementBuilder::new("div")?
                .class("error-message")
                .id("error-message")?
                .text(&reason)
                .build();
            append_child(&error_block, &error_code)?;
            append_child(&error_block, &error_message)?;

            if let Some(stack) = stack {
                let error_stack = ElementBuilder::new("pre")?
                    .class("error-stack")
                    .id("error-stack")?
                    .text(&stack)
                    .build();
                append_child(&error_block, &error_stack)?;
            }

            append_child(&panel, &error_block)?;
        }
    }

    Ok(panel)
}
