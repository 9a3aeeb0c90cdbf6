pub mod gateway_client;
pub mod ledger;
pub mod revert;
pub mod wallet;

pub use gateway_client::GatewayLedgerClient;
pub use ledger::{LedgerClient, LedgerFailure, Receipt, WriteOptions};
pub use revert::{decode_or_fallback, decode_revert_reason};
pub use wallet::{BrowserWallet, WalletProvider};
