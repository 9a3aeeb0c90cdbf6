// ============================================================================
// EVENT HANDLING - Registro de listeners
// ============================================================================
// Los listeners se registran con Closure + forget(): cuando el elemento
// se destruye (re-render con set_inner_html("")), el navegador limpia
// los listeners asociados, así que no hay acumulación.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

/// Registrar un click handler sobre un elemento
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
