pub mod insurance_viewmodel;

pub use insurance_viewmodel::InsuranceViewModel;

use crate::config::AppConfig;
use crate::services::GatewayLedgerClient;
use crate::state::AppState;

/// ViewModel con el cliente del gateway configurado por defecto
pub fn default_viewmodel(state: &AppState) -> InsuranceViewModel<GatewayLedgerClient> {
    InsuranceViewModel::new(
        GatewayLedgerClient::from_env(),
        state.clone(),
        AppConfig::default(),
    )
}
