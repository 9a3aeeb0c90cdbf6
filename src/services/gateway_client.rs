// ============================================================================
// GATEWAY CLIENT - SOLO COMUNICACIÓN HTTP con el gateway del contrato
// ============================================================================
// NO tiene lógica de negocio: envía sobres {method, args, from, value}
// y devuelve el resultado o el fallo estructurado del contrato.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GATEWAY_URL;
use crate::services::ledger::{LedgerClient, LedgerFailure, Receipt, WriteOptions};

/// Cliente HTTP del gateway del contrato (stateless)
#[derive(Clone)]
pub struct GatewayLedgerClient {
    base_url: String,
}

/// Sobre de una llamada al contrato
#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    method: &'a str,
    args: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_price: Option<u64>,
}

/// Respuesta del gateway
#[derive(Debug, Deserialize)]
struct CallResponse {
    success: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    receipt: Option<Receipt>,
    #[serde(default)]
    error: Option<LedgerFailure>,
}

impl GatewayLedgerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Cliente con la URL configurada en tiempo de compilación
    pub fn from_env() -> Self {
        Self::new(GATEWAY_URL)
    }

    async fn post(&self, path: &str, body: &CallRequest<'_>) -> Result<CallResponse, LedgerFailure> {
        let url = format!("{}/v1/contract/{}", self.base_url, path);

        let response = Request::post(&url)
            .json(body)
            .map_err(|e| LedgerFailure::transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| LedgerFailure::transport(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(LedgerFailure::transport(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<CallResponse>()
            .await
            .map_err(|e| LedgerFailure::transport(format!("Parse error: {}", e)))
    }

    fn failure_of(response: CallResponse) -> LedgerFailure {
        response
            .error
            .unwrap_or_else(|| LedgerFailure::transport("Gateway reported failure without detail"))
    }
}

#[async_trait(?Send)]
impl LedgerClient for GatewayLedgerClient {
    async fn read(&self, method: &str, args: &[Value]) -> Result<Value, LedgerFailure> {
        let body = CallRequest {
            method,
            args,
            from: None,
            value: None,
            gas: None,
            gas_price: None,
        };

        let response = self.post("call", &body).await?;
        if response.success {
            Ok(response.result.unwrap_or(Value::Null))
        } else {
            Err(Self::failure_of(response))
        }
    }

    async fn write(
        &self,
        method: &str,
        args: &[Value],
        opts: WriteOptions,
    ) -> Result<Receipt, LedgerFailure> {
        let body = CallRequest {
            method,
            args,
            from: Some(opts.from.as_str()),
            value: opts.value.as_deref(),
            gas: opts.gas,
            gas_price: opts.gas_price,
        };

        let response = self.post("send", &body).await?;
        if response.success {
            Ok(response.receipt.unwrap_or_default())
        } else {
            Err(Self::failure_of(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_request_envelope_shape() {
        let args = vec![Value::String("1000000000000000000".to_string())];
        let body = CallRequest {
            method: "register",
            args: &args,
            from: Some("0xabc"),
            value: Some("100000000000000000"),
            gas: Some(3_000_000),
            gas_price: Some(0),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["method"], "register");
        assert_eq!(json["from"], "0xabc");
        assert_eq!(json["value"], "100000000000000000");
        assert_eq!(json["gas"], 3_000_000);
    }

    #[test]
    fn read_envelope_omits_transaction_fields() {
        let body = CallRequest {
            method: "getTotalUsers",
            args: &[],
            from: None,
            value: None,
            gas: None,
            gas_price: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("from").is_none());
        assert!(json.get("value").is_none());
        assert!(json.get("gas").is_none());
    }

    #[test]
    fn failure_response_deserializes_structured_error() {
        let raw = r#"{"success":false,"error":{"code":-32000,"message":"reverted","stack":"at send"}}"#;
        let response: CallResponse = serde_json::from_str(raw).unwrap();
        assert!(!response.success);

        let failure = GatewayLedgerClient::failure_of(response);
        assert_eq!(failure.code, -32000);
        assert_eq!(failure.message, "reverted");
        assert_eq!(failure.stack.as_deref(), Some("at send"));
    }
}
