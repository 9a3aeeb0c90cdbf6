// ============================================================================
// MODELOS DE RECLAMO - Tipos y estado del reclamo de un móvil
// ============================================================================

use serde::{Deserialize, Serialize};

/// Tipo de reclamo según el contrato: 0 = None, 1 = Loss, 2 = Damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ClaimType {
    None = 0,
    Loss = 1,
    Damage = 2,
}

impl ClaimType {
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(ClaimType::None),
            1 => Some(ClaimType::Loss),
            2 => Some(ClaimType::Damage),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::None => "None",
            ClaimType::Loss => "Loss",
            ClaimType::Damage => "Damage",
        }
    }
}

/// Etiqueta para un valor crudo de tipo de reclamo.
/// El contrato es quien valida: valores fuera de rango se envían igual
/// y se muestran con la etiqueta genérica "Damage" (mismo criterio que
/// el selector de la UI: 0 -> None, 1 -> Loss, resto -> Damage).
pub fn claim_type_label(value: u8) -> &'static str {
    match value {
        0 => "None",
        1 => "Loss",
        _ => "Damage",
    }
}

/// Estado del reclamo en el contrato: 0 = Unaccepted, cualquier otro = Accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    Unaccepted,
    Accepted,
}

impl ClaimStatus {
    pub fn from_code(code: u64) -> Self {
        if code == 0 {
            ClaimStatus::Unaccepted
        } else {
            ClaimStatus::Accepted
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimStatus::Unaccepted => "Unaccepted",
            ClaimStatus::Accepted => "Accepted",
        }
    }
}

/// Resultado de consultar un móvil en el contrato (getStatus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceReport {
    /// Dirección del móvil consultado
    pub address: String,
    /// Precio pagado, en wei (decimal como string, puede exceder u64)
    pub price_wei: String,
    /// Estado del reclamo asociado
    pub claim_status: ClaimStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_status_zero_is_unaccepted() {
        assert_eq!(ClaimStatus::from_code(0), ClaimStatus::Unaccepted);
        assert_eq!(ClaimStatus::from_code(0).label(), "Unaccepted");
    }

    #[test]
    fn claim_status_nonzero_is_accepted() {
        assert_eq!(ClaimStatus::from_code(1), ClaimStatus::Accepted);
        assert_eq!(ClaimStatus::from_code(7).label(), "Accepted");
    }

    #[test]
    fn claim_type_labels() {
        assert_eq!(claim_type_label(0), "None");
        assert_eq!(claim_type_label(1), "Loss");
        assert_eq!(claim_type_label(2), "Damage");
        // Fuera de rango: el contrato valida, la etiqueta es genérica
        assert_eq!(claim_type_label(9), "Damage");
    }

    #[test]
    fn claim_type_from_value_rejects_out_of_range() {
        assert_eq!(ClaimType::from_value(1), Some(ClaimType::Loss));
        assert_eq!(ClaimType::from_value(3), None);
    }
}
