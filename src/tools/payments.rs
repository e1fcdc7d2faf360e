//! Tools that move money or manage payment destinations.

use super::schema::{self, parse_args};
use super::Tool;
use crate::error::Result;
use crate::payman::PaymentsApi;
use crate::types::{
    CustomerDepositRequest, PaymentDestinationSpec, SearchDestinationsQuery, SendPaymentRequest,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub const SEND_PAYMENT: &str = "sendPayment";
pub const SEARCH_DESTINATIONS: &str = "searchDestinations";
pub const CREATE_PAYEE: &str = "createPayee";
pub const INITIATE_CUSTOMER_DEPOSIT: &str = "initiateCustomerDeposit";

// ---------------------------------------------------------------------------
// sendPayment
// ---------------------------------------------------------------------------

pub struct SendPaymentTool {
    client: Arc<dyn PaymentsApi>,
}

impl SendPaymentTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const SEND_PAYMENT_DESCRIPTION: &str = "Send USD from the agent's wallet to a \
    pre-created payment destination. Use this to transfer money to a saved bank account or \
    Payman agent. Requires the paymentDestinationId of an existing destination.";

pub(crate) fn send_payment_schema() -> Value {
    schema::object(
        vec![
            (
                "amountDecimal",
                schema::usd_amount("The amount to send in USD (e.g. 10.00 for $10.00)"),
            ),
            ("customerEmail", schema::string("Email address of the customer")),
            ("customerId", schema::string("ID of the customer")),
            ("customerName", schema::string("Name of the customer")),
            ("memo", schema::string("Note or memo for the payment")),
            (
                "paymentDestinationId",
                schema::string("ID of the pre-created payment destination"),
            ),
        ],
        &["amountDecimal"],
    )
}

#[async_trait]
impl Tool for SendPaymentTool {
    fn name(&self) -> &'static str {
        SEND_PAYMENT
    }

    fn description(&self) -> &'static str {
        SEND_PAYMENT_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        send_payment_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let request: SendPaymentRequest = parse_args(SEND_PAYMENT, args)?;
        debug!(
            "sendPayment {} to {}",
            request.amount_decimal,
            request.payment_destination_id.as_deref().unwrap_or("<none>")
        );
        Ok(self.client.send_payment(&request).await?)
    }
}

// ---------------------------------------------------------------------------
// searchDestinations
// ---------------------------------------------------------------------------

pub struct SearchDestinationsTool {
    client: Arc<dyn PaymentsApi>,
}

impl SearchDestinationsTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const SEARCH_DESTINATIONS_DESCRIPTION: &str = "Search existing payment \
    destinations (saved US bank accounts or Payman agents) by name, customer, or contact \
    email. Use this to find a destination's ID before sending a payment. All filters are \
    optional.";

pub(crate) fn search_destinations_schema() -> Value {
    schema::object(
        vec![
            ("name", schema::string("Name of the payment destination")),
            ("customerId", schema::string("Customer ID who owns the destination")),
            ("contactEmail", schema::string("Contact email to search for")),
        ],
        &[],
    )
}

#[async_trait]
impl Tool for SearchDestinationsTool {
    fn name(&self) -> &'static str {
        SEARCH_DESTINATIONS
    }

    fn description(&self) -> &'static str {
        SEARCH_DESTINATIONS_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        search_destinations_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let query: SearchDestinationsQuery = parse_args(SEARCH_DESTINATIONS, args)?;
        Ok(self.client.search_destinations(&query).await?)
    }
}

// ---------------------------------------------------------------------------
// createPayee
// ---------------------------------------------------------------------------

pub struct CreatePayeeTool {
    client: Arc<dyn PaymentsApi>,
}

impl CreatePayeeTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const CREATE_PAYEE_DESCRIPTION: &str = "Create a new payment destination for \
    future USD payments: either a US bank account (type US_ACH) or another Payman agent \
    (type PAYMAN_AGENT). Fields of one type are not accepted on the other. The returned \
    destination ID can be used with sendPayment.";

fn us_ach_variant() -> Value {
    let contact = schema::object(
        vec![
            ("address", schema::string("Address of the destination contact")),
            ("email", schema::string("Email address of the destination contact")),
            ("phoneNumber", schema::string("Phone number of the destination contact")),
            ("taxId", schema::string("Tax identification of the destination contact")),
        ],
        &[],
    );
    let mut variant = schema::object(
        vec![
            ("type", schema::literal("US_ACH", "US bank account reached over ACH")),
            ("name", schema::non_empty_string("Name for the payment destination")),
            ("customerId", schema::non_empty_string("Customer ID who owns this destination")),
            ("accountHolderName", schema::non_empty_string("Name of the account holder")),
            (
                "accountHolderType",
                schema::string_enum(&["individual", "business"], "Type of account holder"),
            ),
            ("accountNumber", schema::non_empty_string("Bank account number")),
            ("routingNumber", schema::non_empty_string("Bank routing number")),
            (
                "accountType",
                schema::string_enum(&["checking", "savings"], "Type of bank account"),
            ),
            ("contactDetails", contact),
        ],
        &[
            "type",
            "name",
            "customerId",
            "accountHolderName",
            "accountHolderType",
            "accountNumber",
            "routingNumber",
            "accountType",
        ],
    );
    variant["title"] = json!("US_ACH");
    variant
}

fn payman_agent_variant() -> Value {
    let contact = schema::object(
        vec![
            ("email", schema::string("Email address of the destination contact")),
            ("phoneNumber", schema::string("Phone number of the destination contact")),
        ],
        &[],
    );
    let mut variant = schema::object(
        vec![
            ("type", schema::literal("PAYMAN_AGENT", "Another Payman agent's wallet")),
            ("name", schema::non_empty_string("Name for the payment destination")),
            (
                "paymanAgentId",
                schema::non_empty_string("The unique ID of the receiving agent"),
            ),
            ("contactDetails", contact),
        ],
        &["type", "name", "paymanAgentId"],
    );
    variant["title"] = json!("PAYMAN_AGENT");
    variant
}

pub(crate) fn create_payee_schema() -> Value {
    json!({
        "type": "object",
        "oneOf": [us_ach_variant(), payman_agent_variant()],
    })
}

#[async_trait]
impl Tool for CreatePayeeTool {
    fn name(&self) -> &'static str {
        CREATE_PAYEE
    }

    fn description(&self) -> &'static str {
        CREATE_PAYEE_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        create_payee_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let payee: PaymentDestinationSpec = parse_args(CREATE_PAYEE, args)?;
        debug!("createPayee {}", payee.kind());
        Ok(self.client.create_payee(&payee).await?)
    }
}

// ---------------------------------------------------------------------------
// initiateCustomerDeposit
// ---------------------------------------------------------------------------

pub struct InitiateCustomerDepositTool {
    client: Arc<dyn PaymentsApi>,
}

impl InitiateCustomerDepositTool {
    pub fn new(client: Arc<dyn PaymentsApi>) -> Self {
        Self { client }
    }
}

pub(crate) const INITIATE_CUSTOMER_DEPOSIT_DESCRIPTION: &str = "Generate a checkout link \
    that lets a customer add USD to their Payman wallet with a card or bank transfer. Use \
    this when a customer needs to deposit money before making payments. Returns a URL the \
    customer visits to complete the deposit.";

pub(crate) fn initiate_customer_deposit_schema() -> Value {
    schema::object(
        vec![
            (
                "amountDecimal",
                schema::usd_amount("The amount to deposit in USD (e.g. 10.00 for $10.00)"),
            ),
            (
                "customerId",
                schema::non_empty_string("ID of the customer to deposit funds for"),
            ),
            ("customerEmail", schema::string("Email address of the customer")),
            ("customerName", schema::string("Name of the customer")),
            (
                "feeMode",
                schema::string_enum(
                    &["INCLUDED_IN_AMOUNT", "ADD_TO_AMOUNT"],
                    "Whether processing fees are taken from the amount or added to it",
                ),
            ),
            ("memo", schema::string("Memo to associate with the transaction")),
            (
                "walletId",
                schema::string("Wallet to deposit to, if the agent has several"),
            ),
        ],
        &["amountDecimal", "customerId"],
    )
}

#[async_trait]
impl Tool for InitiateCustomerDepositTool {
    fn name(&self) -> &'static str {
        INITIATE_CUSTOMER_DEPOSIT
    }

    fn description(&self) -> &'static str {
        INITIATE_CUSTOMER_DEPOSIT_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        initiate_customer_deposit_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let request: CustomerDepositRequest = parse_args(INITIATE_CUSTOMER_DEPOSIT, args)?;
        debug!(
            "initiateCustomerDeposit {} for {}",
            request.amount_decimal, request.customer_id
        );
        Ok(self.client.initiate_customer_deposit(&request).await?)
    }
}
