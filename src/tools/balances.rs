//! Balance lookups. These are the only tools that shape their output: the
//! backend's raw number is wrapped with the currency (and customer) it
//! was queried for.

use super::schema::{self, parse_args};
use super::Tool;
use crate::error::Result;
use crate::payman::PaymentsApi;
use crate::types::{BalanceSummary, Currency};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const GET_CUSTOMER_BALANCE: &str = "getCustomerBalance";
pub const GET_SPENDABLE_BALANCE: &str = "getSpendableBalance";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CustomerBalanceArgs {
    customer_id: String,
    currency: Currency,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpendableBalanceArgs {
    currency: Currency,
}

// ---------------------------------------------------------------------------
// getCustomerBalance
// ---------------------------------------------------------------------------

pub struct GetCustomerBalanceTool {
    client: Arc<dyn PaymentsApi>,
}

impl GetCustomerBalanceTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const GET_CUSTOMER_BALANCE_DESCRIPTION: &str = "Check how much USD a specific \
    customer has available to spend in their Payman wallet. Use this before initiating \
    payments to verify sufficient funds. Only confirmed, spendable funds are counted \
    (pending transactions are excluded).";

pub(crate) fn get_customer_balance_schema() -> Value {
    schema::object(
        vec![
            (
                "customerId",
                schema::non_empty_string("ID of the customer to check balance for"),
            ),
            ("currency", schema::usd_currency()),
        ],
        &["customerId", "currency"],
    )
}

#[async_trait]
impl Tool for GetCustomerBalanceTool {
    fn name(&self) -> &'static str {
        GET_CUSTOMER_BALANCE
    }

    fn description(&self) -> &'static str {
        GET_CUSTOMER_BALANCE_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        get_customer_balance_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: CustomerBalanceArgs = parse_args(GET_CUSTOMER_BALANCE, args)?;
        debug!("getCustomerBalance for {}", args.customer_id);
        let balance = self
            .client
            .get_customer_balance(&args.customer_id, args.currency)
            .await?;
        Ok(BalanceSummary {
            spendable_balance: balance,
            currency: args.currency,
            customer_id: Some(args.customer_id),
        }
        .into())
    }
}

// ---------------------------------------------------------------------------
// getSpendableBalance
// ---------------------------------------------------------------------------

pub struct GetSpendableBalanceTool {
    client: Arc<dyn PaymentsApi>,
}

impl GetSpendableBalanceTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const GET_SPENDABLE_BALANCE_DESCRIPTION: &str = "Check how much USD the agent \
    (your own account) has available to spend in its Payman wallet. Use this to verify your \
    balance before making payments. Pending transactions and reserved funds are excluded.";

pub(crate) fn get_spendable_balance_schema() -> Value {
    schema::object(vec![("currency", schema::usd_currency())], &["currency"])
}

#[async_trait]
impl Tool for GetSpendableBalanceTool {
    fn name(&self) -> &'static str {
        GET_SPENDABLE_BALANCE
    }

    fn description(&self) -> &'static str {
        GET_SPENDABLE_BALANCE_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        get_spendable_balance_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: SpendableBalanceArgs = parse_args(GET_SPENDABLE_BALANCE, args)?;
        let balance = self.client.get_spendable_balance(args.currency).await?;
        Ok(BalanceSummary {
            spendable_balance: balance,
            currency: args.currency,
            customer_id: None,
        }
        .into())
    }
}
