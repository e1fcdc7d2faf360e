//! Recording `PaymentsApi` stand-in for the integration tests.

use async_trait::async_trait;
use paykit::error::BackendError;
use paykit::payman::PaymentsApi;
use paykit::types::{
    Currency, CustomerDepositRequest, PaymentDestinationSpec, SearchDestinationsQuery,
    SendPaymentRequest,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// One backend call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub body: Value,
}

#[derive(Default)]
pub struct MockPayments {
    calls: Mutex<Vec<Recorded>>,
    customer_balances: HashMap<String, f64>,
    spendable_balance: f64,
    payment_response: Option<Value>,
    failure: Option<(u16, String)>,
    delays: HashMap<&'static str, Duration>,
}

impl MockPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer_balance(mut self, customer_id: &str, balance: f64) -> Self {
        self.customer_balances.insert(customer_id.to_string(), balance);
        self
    }

    pub fn with_spendable_balance(mut self, balance: f64) -> Self {
        self.spendable_balance = balance;
        self
    }

    pub fn with_payment_response(mut self, response: Value) -> Self {
        self.payment_response = Some(response);
        self
    }

    /// Every call fails with this status and body.
    pub fn failing(mut self, status: u16, body: &str) -> Self {
        self.failure = Some((status, body.to_string()));
        self
    }

    /// Hold `method` for `delay` before answering.
    pub fn with_delay(mut self, method: &'static str, delay: Duration) -> Self {
        self.delays.insert(method, delay);
        self
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, method: &'static str, body: Value) -> Result<(), BackendError> {
        if let Some(delay) = self.delays.get(method) {
            tokio::time::sleep(*delay).await;
        }
        self.calls.lock().unwrap().push(Recorded { method, body });
        match &self.failure {
            Some((status, body)) => Err(BackendError::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentsApi for MockPayments {
    async fn send_payment(&self, request: &SendPaymentRequest) -> Result<Value, BackendError> {
        self.record("send_payment", serde_json::to_value(request).unwrap())
            .await?;
        Ok(self.payment_response.clone().unwrap_or_else(|| {
            json!({ "reference": "txn_1", "status": "INITIATED" })
        }))
    }

    async fn search_destinations(
        &self,
        query: &SearchDestinationsQuery,
    ) -> Result<Value, BackendError> {
        self.record("search_destinations", serde_json::to_value(query).unwrap())
            .await?;
        Ok(json!([
            { "id": "dest_2", "name": "Savings" },
            { "id": "dest_1", "name": "Jon" }
        ]))
    }

    async fn create_payee(&self, payee: &PaymentDestinationSpec) -> Result<Value, BackendError> {
        let body = serde_json::to_value(payee).unwrap();
        self.record("create_payee", body.clone()).await?;
        let mut created = body;
        created["id"] = json!("dest_new");
        Ok(created)
    }

    async fn initiate_customer_deposit(
        &self,
        request: &CustomerDepositRequest,
    ) -> Result<Value, BackendError> {
        self.record(
            "initiate_customer_deposit",
            serde_json::to_value(request).unwrap(),
        )
        .await?;
        Ok(json!({ "checkoutUrl": "https://checkout.example/abc" }))
    }

    async fn get_customer_balance(
        &self,
        customer_id: &str,
        currency: Currency,
    ) -> Result<f64, BackendError> {
        self.record(
            "get_customer_balance",
            json!({ "customerId": customer_id, "currency": currency.code() }),
        )
        .await?;
        Ok(self
            .customer_balances
            .get(customer_id)
            .copied()
            .unwrap_or(0.0))
    }

    async fn get_spendable_balance(&self, currency: Currency) -> Result<f64, BackendError> {
        self.record(
            "get_spendable_balance",
            json!({ "currency": currency.code() }),
        )
        .await?;
        Ok(self.spendable_balance)
    }
}
