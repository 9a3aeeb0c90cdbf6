// ============================================================================
// REVERT DECODER - Extrae la razón legible de un revert del contrato
// ============================================================================
// Los providers devuelven el revert como texto opaco que a veces lleva
// incrustado un objeto JSON con la forma:
//   ... {"data":{"data":{"0x...":{"reason":"device not registered", ...}}}} ...
// La decodificación NUNCA falla: si el payload no tiene esa forma se
// devuelve el mensaje original tal cual.
// ============================================================================

use serde_json::Value;

/// Intentar extraer la razón del revert incrustada en el mensaje.
/// Devuelve None si el payload no contiene un JSON con la forma esperada.
pub fn decode_revert_reason(raw: &str) -> Option<String> {
    // Localizar el objeto JSON incrustado: del primer '{' al último '}'
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let parsed: Value = serde_json::from_str(&raw[start..=end]).ok()?;

    // Primera entrada del mapa data.data (el orden textual se preserva)
    let entries = parsed.get("data")?.get("data")?.as_object()?;
    let (_, first) = entries.iter().next()?;

    Some(first.get("reason")?.as_str()?.to_string())
}

/// Decodificar o degradar al mensaje crudo sin modificar.
pub fn decode_or_fallback(raw: &str) -> String {
    decode_revert_reason(raw).unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reverted_payload(reason: &str) -> String {
        format!(
            r#"Transaction has been reverted by the EVM: {{"data":{{"data":{{"0xabc123":{{"reason":"{}","error":"revert"}}}}}},"code":-32000}}"#,
            reason
        )
    }

    #[test]
    fn decodes_structured_revert_reason() {
        let raw = reverted_payload("device not registered");
        assert_eq!(
            decode_revert_reason(&raw).as_deref(),
            Some("device not registered")
        );
        assert_eq!(decode_or_fallback(&raw), "device not registered");
    }

    #[test]
    fn takes_first_entry_of_data_map() {
        let raw = r#"err: {"data":{"data":{"0x01":{"reason":"first"},"0x02":{"reason":"second"}}}}"#;
        assert_eq!(decode_revert_reason(raw).as_deref(), Some("first"));
    }

    #[test]
    fn plain_string_falls_back_unchanged() {
        let raw = "connection refused";
        assert_eq!(decode_revert_reason(raw), None);
        assert_eq!(decode_or_fallback(raw), "connection refused");
    }

    #[test]
    fn malformed_json_falls_back_unchanged() {
        let raw = "oops {not json at all}";
        assert_eq!(decode_revert_reason(raw), None);
        assert_eq!(decode_or_fallback(raw), raw);
    }

    #[test]
    fn json_without_expected_shape_falls_back() {
        let raw = r#"error: {"code":4001,"message":"User rejected the request"}"#;
        assert_eq!(decode_revert_reason(raw), None);
        assert_eq!(decode_or_fallback(raw), raw);
    }

    #[test]
    fn missing_reason_field_falls_back() {
        let raw = r#"{"data":{"data":{"0x01":{"error":"revert"}}}}"#;
        assert_eq!(decode_revert_reason(raw), None);
    }

    #[test]
    fn empty_input_yields_empty_fallback() {
        assert_eq!(decode_revert_reason(""), None);
        assert_eq!(decode_or_fallback(""), "");
    }
}
