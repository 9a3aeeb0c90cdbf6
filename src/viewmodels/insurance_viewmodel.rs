// ============================================================================
// INSURANCE VIEWMODEL - Ciclo de vida del seguro (controller)
// ============================================================================
// Las cinco operaciones del producto (register, createClaim, acceptClaim,
// executeClaim, getStatus) más la reconciliación de totales. Cada
// operación de escritura es una cadena secuencial: reset de estado ->
// mensaje de progreso -> una escritura al contrato -> mensaje de éxito ->
// refresco de totales. Un fallo corta la cadena: se decodifica, se
// muestra y NO se refrescan totales. Sin reintentos: el usuario vuelve
// a disparar la acción.
// ============================================================================

use serde_json::Value;

use crate::config::AppConfig;
use crate::models::claim::{claim_type_label, ClaimStatus, DeviceReport};
use crate::models::totals::Totals;
use crate::services::ledger::{LedgerClient, LedgerFailure, Receipt, WriteOptions};
use crate::state::AppState;
use crate::utils::eth;

/// Rechazo local: ya hay una transacción en vuelo
const CODE_BUSY: i64 = -32002;
/// Rechazo local: sesión no lista (wallet sin cuenta)
const CODE_NOT_READY: i64 = 4100;
/// Rechazo local: entrada inválida (conversión de unidades)
const CODE_INVALID_INPUT: i64 = -32602;

/// ViewModel del seguro - SOLO lógica de negocio
pub struct InsuranceViewModel<L: LedgerClient> {
    ledger: L,
    state: AppState,
    config: AppConfig,
}

impl<L: LedgerClient> InsuranceViewModel<L> {
    pub fn new(ledger: L, state: AppState, config: AppConfig) -> Self {
        Self {
            ledger,
            state,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Operaciones de ciclo de vida
    // ------------------------------------------------------------------

    /// Registrar un móvil pagando su precio; el depósito adjunto es una
    /// fracción del precio según la política configurada.
    pub async fn register(&self, price_in_ether: &str) {
        let from = match self.begin_write() {
            Some(account) => account,
            None => return,
        };
        self.set_progress("Initiating transaction... (please wait)");

        let price_wei = match eth::to_wei(price_in_ether) {
            Ok(value) => value,
            Err(message) => {
                self.show_failure(LedgerFailure {
                    code: CODE_INVALID_INPUT,
                    message,
                    stack: None,
                });
                self.finish_operation();
                return;
            }
        };
        let deposit = eth::deposit_for(price_wei, self.config.deposit_divisor);

        let opts = WriteOptions {
            from,
            value: Some(deposit.to_string()),
            gas: Some(self.config.gas_limit),
            gas_price: Some(self.config.gas_price),
        };
        let outcome = self
            .ledger
            .write("register", &[Value::String(price_wei.to_string())], opts)
            .await;

        self.complete_write(outcome, "Mobile registered").await;
        self.finish_operation();
    }

    /// Presentar un reclamo para el móvil de la cuenta activa.
    /// El tipo se envía tal cual: valores fuera de rango los rechaza el
    /// contrato y el revert se muestra decodificado.
    pub async fn create_claim(&self, claim_type: u8) {
        let from = match self.begin_write() {
            Some(account) => account,
            None => return,
        };
        self.set_progress(&format!("Initiating claim {}", claim_type_label(claim_type)));

        let opts = WriteOptions {
            from,
            ..WriteOptions::default()
        };
        let outcome = self
            .ledger
            .write("createClaim", &[Value::from(claim_type)], opts)
            .await;

        self.complete_write(outcome, "Claim registered").await;
        self.finish_operation();
    }

    /// Aceptar (como autoridad) el reclamo del móvil indicado.
    pub async fn accept_claim(&self, device_address: &str) {
        let from = match self.begin_write() {
            Some(account) => account,
            None => return,
        };
        self.set_progress(&format!("Accepting claim of {}", device_address));

        let opts = WriteOptions {
            from,
            ..WriteOptions::default()
        };
        let outcome = self
            .ledger
            .write(
                "acceptClaim",
                &[Value::String(device_address.to_string())],
                opts,
            )
            .await;

        self.complete_write(outcome, "Claim accepted").await;
        self.finish_operation();
    }

    /// Ejecutar (cobrar) el reclamo aceptado de la cuenta activa.
    pub async fn execute_claim(&self) {
        let from = match self.begin_write() {
            Some(account) => account,
            None => return,
        };
        self.set_progress("Executing current claim");

        let opts = WriteOptions {
            from,
            ..WriteOptions::default()
        };
        let outcome = self.ledger.write("executeClaim", &[], opts).await;

        self.complete_write(outcome, "Claim executed").await;
        self.finish_operation();
    }

    /// Consultar precio y estado de reclamo de un móvil (dos lecturas).
    pub async fn get_status(&self, device_address: &str) {
        if !self.begin_operation() {
            return;
        }

        match self.read_device(device_address).await {
            Ok(report) => {
                *self.state.device_report.borrow_mut() = Some(report);
                self.state.notify_subscribers();
            }
            Err(failure) => self.show_failure(failure),
        }
        self.finish_operation();
    }

    // ------------------------------------------------------------------
    // Reconciliación de totales
    // ------------------------------------------------------------------

    /// Releer los tres contadores agregados y publicar el snapshot.
    /// Sin caché: siempre va al contrato. Las tres lecturas son
    /// independientes; si una falla, falla la reconciliación completa.
    pub async fn refresh_totals(&self) -> Result<(), LedgerFailure> {
        let balance = self.ledger.read("getTotalBalance", &[]).await?;
        let users = self.ledger.read("getTotalUsers", &[]).await?;
        let claims = self.ledger.read("getTotalClaims", &[]).await?;

        self.state.totals.set(Totals {
            total_users: value_as_count(&users),
            total_balance: value_as_amount(&balance),
            total_claims: value_as_count(&claims),
        });
        self.state.notify_subscribers();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Secuenciación y fallos
    // ------------------------------------------------------------------

    /// Inicio de toda operación: rechaza si hay otra en vuelo y resetea
    /// el canal de estado. Devuelve false si la operación fue rechazada.
    fn begin_operation(&self) -> bool {
        if *self.state.tx_in_flight.borrow() {
            self.state.status.set_error(
                CODE_BUSY,
                "Transaction already in progress... (please wait)",
                None,
            );
            self.state.notify_subscribers();
            return false;
        }

        self.state.status.reset();
        *self.state.tx_in_flight.borrow_mut() = true;
        true
    }

    /// Inicio de una escritura: además de begin_operation, captura la
    /// cuenta activa UNA vez. Un cambio de cuenta durante la operación
    /// no la afecta (carrera aceptada).
    fn begin_write(&self) -> Option<String> {
        if !self.begin_operation() {
            return None;
        }

        match self.state.session.active_account() {
            Some(account) => Some(account),
            None => {
                self.state
                    .status
                    .set_error(CODE_NOT_READY, "Wallet not connected", None);
                self.state.notify_subscribers();
                *self.state.tx_in_flight.borrow_mut() = false;
                None
            }
        }
    }

    fn finish_operation(&self) {
        *self.state.tx_in_flight.borrow_mut() = false;
    }

    fn set_progress(&self, message: &str) {
        self.state.status.set_status(message);
        self.state.notify_subscribers();
    }

    /// Desenlace de una escritura: éxito publica el mensaje y reconcilia
    /// totales; fallo muestra el error y NO reconcilia.
    async fn complete_write(&self, outcome: Result<Receipt, LedgerFailure>, success_message: &str) {
        match outcome {
            Ok(_) => {
                self.state.status.set_status(success_message);
                self.state.notify_subscribers();
                if let Err(failure) = self.refresh_totals().await {
                    log::error!("❌ Error refrescando totales: {}", failure.message);
                }
            }
            Err(failure) => self.show_failure(failure),
        }
    }

    fn show_failure(&self, failure: LedgerFailure) {
        log::error!(
            "❌ Llamada al contrato fallida ({}): {}",
            failure.code,
            failure.message
        );
        self.state
            .status
            .set_error(failure.code, &failure.message, failure.stack);
        self.state.notify_subscribers();
    }

    async fn read_device(&self, device_address: &str) -> Result<DeviceReport, LedgerFailure> {
        let price = self
            .ledger
            .read(
                "getMobilePrice",
                &[Value::String(device_address.to_string())],
            )
            .await?;
        let status = self
            .ledger
            .read(
                "getClaimStatus",
                &[Value::String(device_address.to_string())],
            )
            .await?;

        Ok(DeviceReport {
            address: device_address.to_string(),
            price_wei: value_as_amount(&price),
            claim_status: ClaimStatus::from_code(value_as_count(&status)),
        })
    }
}

/// Contador devuelto por el contrato: número o string decimal
fn value_as_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Cantidad en wei devuelta por el contrato: se conserva como string
fn value_as_amount(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::StatusMessage;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedWrite {
        method: String,
        args: Vec<Value>,
        opts: WriteOptions,
    }

    /// Ledger de prueba: registra llamadas y devuelve resultados fijos
    #[derive(Clone, Default)]
    struct MockLedger {
        reads: Rc<RefCell<Vec<String>>>,
        writes: Rc<RefCell<Vec<RecordedWrite>>>,
        read_results: Rc<RefCell<HashMap<String, Value>>>,
        write_failure: Rc<RefCell<Option<LedgerFailure>>>,
        // Hook ejecutado dentro de write, antes de responder (para
        // simular eventos concurrentes como accountsChanged)
        on_write: Rc<RefCell<Option<Box<dyn Fn()>>>>,
    }

    impl MockLedger {
        fn stub_read(&self, method: &str, value: Value) {
            self.read_results
                .borrow_mut()
                .insert(method.to_string(), value);
        }

        fn fail_writes_with(&self, failure: LedgerFailure) {
            *self.write_failure.borrow_mut() = Some(failure);
        }

        fn reads_of(&self, method: &str) -> usize {
            self.reads.borrow().iter().filter(|m| *m == method).count()
        }
    }

    #[async_trait(?Send)]
    impl LedgerClient for MockLedger {
        async fn read(&self, method: &str, _args: &[Value]) -> Result<Value, LedgerFailure> {
            self.reads.borrow_mut().push(method.to_string());
            Ok(self
                .read_results
                .borrow()
                .get(method)
                .cloned()
                .unwrap_or(Value::from(0)))
        }

        async fn write(
            &self,
            method: &str,
            args: &[Value],
            opts: WriteOptions,
        ) -> Result<Receipt, LedgerFailure> {
            if let Some(hook) = self.on_write.borrow().as_ref() {
                hook();
            }
            self.writes.borrow_mut().push(RecordedWrite {
                method: method.to_string(),
                args: args.to_vec(),
                opts,
            });
            match self.write_failure.borrow().clone() {
                Some(failure) => Err(failure),
                None => Ok(Receipt::default()),
            }
        }
    }

    fn viewmodel_with(ledger: MockLedger) -> (InsuranceViewModel<MockLedger>, AppState) {
        let state = AppState::new();
        state.session.set_active_account(Some("0xalice".to_string()));
        let vm = InsuranceViewModel::new(ledger, state.clone(), AppConfig::default());
        (vm, state)
    }

    #[test]
    fn register_sends_deposit_fraction_and_reconciles() {
        let ledger = MockLedger::default();
        ledger.stub_read("getTotalUsers", Value::from(3));
        ledger.stub_read("getTotalBalance", Value::String("1500000000000000000".into()));
        ledger.stub_read("getTotalClaims", Value::from(1));
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.register("1"));

        let writes = ledger.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].method, "register");
        assert_eq!(
            writes[0].args,
            vec![Value::String("1000000000000000000".to_string())]
        );
        assert_eq!(writes[0].opts.from, "0xalice");
        // Depósito = precio / 10 (política por defecto)
        assert_eq!(
            writes[0].opts.value.as_deref(),
            Some("100000000000000000")
        );
        assert_eq!(writes[0].opts.gas, Some(3_000_000));

        assert_eq!(
            state.status.current(),
            StatusMessage::Info("Mobile registered".to_string())
        );

        // Reconciliación exactamente una vez por escritura exitosa
        assert_eq!(ledger.reads_of("getTotalUsers"), 1);
        assert_eq!(ledger.reads_of("getTotalBalance"), 1);
        assert_eq!(ledger.reads_of("getTotalClaims"), 1);

        let totals = state.totals.current();
        assert_eq!(totals.total_users, 3);
        assert_eq!(totals.total_balance, "1500000000000000000");
        assert_eq!(totals.total_claims, 1);

        assert!(!*state.tx_in_flight.borrow());
    }

    #[test]
    fn failed_write_shows_decoded_reason_and_skips_reconciliation() {
        let ledger = MockLedger::default();
        ledger.fail_writes_with(LedgerFailure {
            code: -32000,
            message: r#"Transaction has been reverted by the EVM: {"data":{"data":{"0x01":{"reason":"device not registered"}}}}"#.to_string(),
            stack: Some("at send".to_string()),
        });
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.create_claim(1));

        match state.status.current() {
            StatusMessage::Error { code, reason, stack, .. } => {
                assert_eq!(code, -32000);
                assert_eq!(reason, "device not registered");
                assert_eq!(stack.as_deref(), Some("at send"));
            }
            other => panic!("expected error, got {:?}", other),
        }

        // Sin reconciliación tras un fallo
        assert!(ledger.reads.borrow().is_empty());
        assert_eq!(state.totals.current(), Totals::default());
        assert!(!*state.tx_in_flight.borrow());
    }

    #[test]
    fn create_claim_forwards_raw_type_to_ledger() {
        let ledger = MockLedger::default();
        let (vm, _state) = viewmodel_with(ledger.clone());

        block_on(vm.create_claim(2));

        let writes = ledger.writes.borrow();
        assert_eq!(writes[0].method, "createClaim");
        assert_eq!(writes[0].args, vec![Value::from(2u8)]);
        assert_eq!(writes[0].opts.value, None);
    }

    #[test]
    fn accept_and_execute_publish_success_messages() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.accept_claim("0xdevice"));
        assert_eq!(
            state.status.current(),
            StatusMessage::Info("Claim accepted".to_string())
        );

        block_on(vm.execute_claim());
        assert_eq!(
            state.status.current(),
            StatusMessage::Info("Claim executed".to_string())
        );

        let writes = ledger.writes.borrow();
        assert_eq!(writes[0].method, "acceptClaim");
        assert_eq!(writes[0].args, vec![Value::String("0xdevice".to_string())]);
        assert_eq!(writes[1].method, "executeClaim");
        assert!(writes[1].args.is_empty());
    }

    #[test]
    fn progress_message_is_visible_during_the_call() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        let seen = Rc::new(RefCell::new(None));
        {
            let seen = seen.clone();
            let status = state.status.clone();
            *ledger.on_write.borrow_mut() = Some(Box::new(move || {
                *seen.borrow_mut() = Some(status.current());
            }));
        }

        block_on(vm.accept_claim("0xdevice"));

        assert_eq!(
            seen.borrow().clone(),
            Some(StatusMessage::Info("Accepting claim of 0xdevice".to_string()))
        );
    }

    #[test]
    fn get_status_renders_unaccepted_for_zero() {
        let ledger = MockLedger::default();
        ledger.stub_read("getMobilePrice", Value::String("1000000000000000000".into()));
        ledger.stub_read("getClaimStatus", Value::from(0));
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.get_status("0xdevice"));

        let report = state.device_report.borrow().clone().unwrap();
        assert_eq!(report.address, "0xdevice");
        assert_eq!(report.price_wei, "1000000000000000000");
        assert_eq!(report.claim_status, ClaimStatus::Unaccepted);
        assert_eq!(report.claim_status.label(), "Unaccepted");
    }

    #[test]
    fn get_status_renders_accepted_for_nonzero() {
        let ledger = MockLedger::default();
        ledger.stub_read("getClaimStatus", Value::from(1));
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.get_status("0xdevice"));

        let report = state.device_report.borrow().clone().unwrap();
        assert_eq!(report.claim_status, ClaimStatus::Accepted);
    }

    #[test]
    fn busy_operation_is_rejected_without_ledger_call() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        *state.tx_in_flight.borrow_mut() = true;
        block_on(vm.execute_claim());

        assert!(ledger.writes.borrow().is_empty());
        match state.status.current() {
            StatusMessage::Error { code, .. } => assert_eq!(code, CODE_BUSY),
            other => panic!("expected busy error, got {:?}", other),
        }
        // La operación en vuelo conserva su flag
        assert!(*state.tx_in_flight.borrow());
    }

    #[test]
    fn missing_account_fails_fast() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());
        state.session.set_active_account(None);

        block_on(vm.register("1"));

        assert!(ledger.writes.borrow().is_empty());
        match state.status.current() {
            StatusMessage::Error { code, reason, .. } => {
                assert_eq!(code, CODE_NOT_READY);
                assert_eq!(reason, "Wallet not connected");
            }
            other => panic!("expected not-ready error, got {:?}", other),
        }
        assert!(!*state.tx_in_flight.borrow());
    }

    #[test]
    fn invalid_price_is_a_local_error() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        block_on(vm.register("not a number"));

        assert!(ledger.writes.borrow().is_empty());
        match state.status.current() {
            StatusMessage::Error { code, .. } => assert_eq!(code, CODE_INVALID_INPUT),
            other => panic!("expected input error, got {:?}", other),
        }
        assert!(!*state.tx_in_flight.borrow());
    }

    #[test]
    fn account_change_mid_operation_uses_captured_account() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        // accountsChanged dispara mientras la escritura está en vuelo
        {
            let session = state.session.clone();
            *ledger.on_write.borrow_mut() = Some(Box::new(move || {
                session.set_active_account(Some("0xbob".to_string()));
            }));
        }

        block_on(vm.accept_claim("0xdevice"));
        // La operación en vuelo usa la cuenta capturada al inicio
        assert_eq!(ledger.writes.borrow()[0].opts.from, "0xalice");

        *ledger.on_write.borrow_mut() = None;
        block_on(vm.execute_claim());
        // La siguiente operación usa la cuenta nueva
        assert_eq!(ledger.writes.borrow()[1].opts.from, "0xbob");
    }

    #[test]
    fn write_resets_previous_status_before_running() {
        let ledger = MockLedger::default();
        let (vm, state) = viewmodel_with(ledger.clone());

        state.status.set_error(4001, "old error", None);
        block_on(vm.execute_claim());

        // El error previo fue descartado al inicio de la operación
        assert_eq!(
            state.status.current(),
            StatusMessage::Info("Claim executed".to_string())
        );
    }
}
