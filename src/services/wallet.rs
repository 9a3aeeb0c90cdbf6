// ============================================================================
// WALLET PROVIDER - Identidad y firma (window.ethereum)
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - El listener de accountsChanged es global (vive en el provider), así
//   que solo debe registrarse UNA VEZ. Se protege con un flag, igual
//   que los listeners globales de window.
// ============================================================================

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Proveedor de identidad: expone la cuenta activa y notifica cambios.
/// `?Send` porque el target wasm es de un solo hilo.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Cuenta activa actual (None si el usuario no conectó ninguna)
    async fn current_account(&self) -> Result<Option<String>, String>;

    /// Suscribirse al cambio de cuentas del provider
    fn on_accounts_changed(&self, callback: Box<dyn Fn(Option<String>)>) -> Result<(), String>;
}

/// Wallet del navegador (MetaMask u otro provider inyectado en window.ethereum)
pub struct BrowserWallet {
    // Flag para prevenir múltiples registros del listener global
    listener_registered: Rc<RefCell<bool>>,
}

impl BrowserWallet {
    pub fn new() -> Self {
        Self {
            listener_registered: Rc::new(RefCell::new(false)),
        }
    }

    /// Obtener el provider inyectado (window.ethereum)
    fn provider() -> Result<Object, String> {
        let window = web_sys::window().ok_or("No window available")?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| "No web3 provider detected".to_string())?;

        if ethereum.is_undefined() || ethereum.is_null() {
            return Err("No web3 provider detected".to_string());
        }

        ethereum
            .dyn_into::<Object>()
            .map_err(|_| "window.ethereum is not an object".to_string())
    }

    /// Invocar provider.request({ method }) y esperar la promesa
    async fn request(method: &str) -> Result<JsValue, String> {
        let provider = Self::provider()?;

        let request_fn = Reflect::get(&provider, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or("Provider has no request method")?;

        let params = Object::new();
        Reflect::set(
            &params,
            &JsValue::from_str("method"),
            &JsValue::from_str(method),
        )
        .map_err(|_| "Could not build request params".to_string())?;

        let promise = request_fn
            .call1(&provider, &params)
            .map_err(|e| format!("Provider request failed: {:?}", e))?
            .dyn_into::<Promise>()
            .map_err(|_| "Provider request did not return a promise".to_string())?;

        JsFuture::from(promise)
            .await
            .map_err(|e| format!("Provider request rejected: {:?}", e))
    }

    /// Primera cuenta de un array de cuentas del provider
    fn first_account(value: &JsValue) -> Option<String> {
        let accounts = Array::from(value);
        accounts.get(0).as_string()
    }
}

impl Default for BrowserWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl WalletProvider for BrowserWallet {
    async fn current_account(&self) -> Result<Option<String>, String> {
        // eth_requestAccounts pide permiso al usuario la primera vez
        let result = Self::request("eth_requestAccounts").await?;
        Ok(Self::first_account(&result))
    }

    fn on_accounts_changed(&self, callback: Box<dyn Fn(Option<String>)>) -> Result<(), String> {
        if *self.listener_registered.borrow() {
            log::warn!("⚠️ Listener de accountsChanged ya registrado, ignorando");
            return Ok(());
        }

        let provider = Self::provider()?;

        let on_fn = Reflect::get(&provider, &JsValue::from_str("on"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or("Provider has no event subscription")?;

        let closure = Closure::wrap(Box::new(move |accounts: JsValue| {
            let account = BrowserWallet::first_account(&accounts);
            log::info!("🔁 Cuenta activa cambiada: {:?}", account);
            callback(account);
        }) as Box<dyn FnMut(JsValue)>);

        on_fn
            .call2(
                &provider,
                &JsValue::from_str("accountsChanged"),
                closure.as_ref().unchecked_ref(),
            )
            .map_err(|e| format!("Could not subscribe to accountsChanged: {:?}", e))?;

        // Nota: closure.forget() es necesario para mantener el closure vivo.
        // El listener se registra una sola vez, no hay acumulación.
        closure.forget();
        *self.listener_registered.borrow_mut() = true;

        Ok(())
    }
}
