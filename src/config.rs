// ============================================================================
// CONFIG - Configuración de la aplicación
// ============================================================================

/// URL base del gateway del contrato
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://127.0.0.1:8545 (por defecto, nodo local)
/// - Producción: via GATEWAY_URL env var (ver build.rs)
pub const GATEWAY_URL: &str = match option_env!("GATEWAY_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8545",
};

/// Configuración de la app de seguros
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub gateway_url: String,
    /// Fracción del precio enviada como depósito al registrar:
    /// depósito = precio_en_wei / deposit_divisor
    pub deposit_divisor: u64,
    /// Gas límite para transacciones de registro
    pub gas_limit: u64,
    /// Precio del gas (0 en redes de prueba)
    pub gas_price: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: GATEWAY_URL.to_string(),
            deposit_divisor: 10,
            gas_limit: 3_000_000,
            gas_price: 0,
        }
    }
}
