// ============================================================================
// TOTALES - Contadores agregados del contrato
// ============================================================================

use serde::{Deserialize, Serialize};

/// Snapshot de los tres contadores agregados del contrato.
/// Se recalcula con tres lecturas independientes; no hay atomicidad
/// entre ellas (puede haber sesgo transitorio si otro actor escribe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_users: u64,
    /// Balance total en wei (decimal como string, puede exceder u64)
    pub total_balance: String,
    pub total_claims: u64,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            total_users: 0,
            total_balance: "0".to_string(),
            total_claims: 0,
        }
    }
}
