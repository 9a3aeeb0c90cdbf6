// ============================================================================
// LEDGER CLIENT - Contrato del cliente del libro mayor (capability trait)
// ============================================================================
// Toda interacción con el contrato pasa por este trait: lecturas sin
// firma (read) y transacciones firmadas (write). El resto de la app no
// conoce el transporte.
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Código sintético para fallos de transporte (sin respuesta del contrato)
pub const TRANSPORT_ERROR_CODE: i64 = -32000;

/// Fallo de una llamada al contrato.
/// `message` puede llevar incrustada una razón de revert decodificable
/// (ver services::revert).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerFailure {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub stack: Option<String>,
}

impl LedgerFailure {
    /// Fallo de transporte: error de red o respuesta no interpretable
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: TRANSPORT_ERROR_CODE,
            message: message.into(),
            stack: None,
        }
    }
}

/// Opciones de una transacción firmada
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    /// Cuenta emisora (capturada al inicio de la operación)
    pub from: String,
    /// Valor adjunto en wei (decimal como string)
    pub value: Option<String>,
    pub gas: Option<u64>,
    pub gas_price: Option<u64>,
}

/// Recibo de una transacción confirmada
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(default)]
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Cliente del contrato de seguros.
/// `?Send` porque el target wasm es de un solo hilo.
#[async_trait(?Send)]
pub trait LedgerClient {
    /// Lectura sin firma de un método del contrato
    async fn read(&self, method: &str, args: &[Value]) -> Result<Value, LedgerFailure>;

    /// Transacción firmada contra un método del contrato
    async fn write(
        &self,
        method: &str,
        args: &[Value],
        opts: WriteOptions,
    ) -> Result<Receipt, LedgerFailure>;
}
