//! The payments collaborator the tools forward to.

use crate::error::BackendError;
use crate::types::{
    Currency, CustomerDepositRequest, PaymentDestinationSpec, SearchDestinationsQuery,
    SendPaymentRequest,
};
use async_trait::async_trait;
use serde_json::Value;

/// Payman payments and balances surface.
///
/// Success values are returned as the backend produced them; the tools do
/// not reshape them (the balance tools only wrap the raw number).
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// Send funds from the agent wallet to a saved destination.
    async fn send_payment(&self, request: &SendPaymentRequest) -> Result<Value, BackendError>;

    /// Look up saved destinations. An empty query is allowed.
    async fn search_destinations(
        &self,
        query: &SearchDestinationsQuery,
    ) -> Result<Value, BackendError>;

    /// Create a reusable payment destination.
    async fn create_payee(&self, payee: &PaymentDestinationSpec) -> Result<Value, BackendError>;

    /// Generate a checkout link for a customer deposit.
    async fn initiate_customer_deposit(
        &self,
        request: &CustomerDepositRequest,
    ) -> Result<Value, BackendError>;

    /// Spendable balance held for a customer.
    async fn get_customer_balance(
        &self,
        customer_id: &str,
        currency: Currency,
    ) -> Result<f64, BackendError>;

    /// Spendable balance of the agent's own wallet.
    async fn get_spendable_balance(&self, currency: Currency) -> Result<f64, BackendError>;
}
