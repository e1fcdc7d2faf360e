//! Shared types used across the toolkit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Payman deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    /// Default API base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://agent.payman.ai/api",
            Self::Sandbox => "https://agent-sandbox.payman.ai/api",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!(
                "unknown environment '{}' (expected production or sandbox)",
                other
            )),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Currency code. USD is the only one the wallet supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Positive USD amount with at most two fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl TryFrom<f64> for Amount {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("amount must be a positive number, got {}", value));
        }
        // Checked on the shortest decimal form of the number as written.
        let exact = Decimal::from_str(&value.to_string())
            .map_err(|e| format!("amount {} is out of range: {}", value, e))?
            .normalize();
        if exact.scale() > 2 {
            return Err(format!("amount {} has more than two decimal places", value));
        }
        Ok(Self(value))
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Body of a send-payment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendPaymentRequest {
    pub amount_decimal: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Optional here; the backend rejects payments without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_destination_id: Option<String>,
}

/// Filter for destination search. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchDestinationsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl SearchDestinationsQuery {
    /// Query-string pairs for the fields that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.as_str()));
        }
        if let Some(customer_id) = &self.customer_id {
            pairs.push(("customerId", customer_id.as_str()));
        }
        if let Some(email) = &self.contact_email {
            pairs.push(("contactEmail", email.as_str()));
        }
        pairs
    }
}

/// How processing fees apply to a customer deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeMode {
    /// Fees are deducted from the stated amount.
    IncludedInAmount,
    /// Fees are added on top of the stated amount.
    AddToAmount,
}

/// Body of a customer deposit (checkout link) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerDepositRequest {
    pub amount_decimal: Amount,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_mode: Option<FeeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Target wallet when the agent holds more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Payees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountHolderType {
    Individual,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

/// Contact block accepted on a bank-account payee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AchContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Contact block accepted on an agent payee (no address or tax id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AgentContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A US bank account reached over ACH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UsAchPayee {
    pub name: String,
    pub customer_id: String,
    pub account_holder_name: String,
    pub account_holder_type: AccountHolderType,
    pub account_number: String,
    pub routing_number: String,
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<AchContactDetails>,
}

/// Another Payman agent's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaymanAgentPayee {
    pub name: String,
    pub payman_agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<AgentContactDetails>,
}

/// Payment destination to create, selected by its `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentDestinationSpec {
    #[serde(rename = "US_ACH")]
    UsAch(UsAchPayee),
    #[serde(rename = "PAYMAN_AGENT")]
    PaymanAgent(PaymanAgentPayee),
}

impl PaymentDestinationSpec {
    /// Wire tag of the selected variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UsAch(_) => "US_ACH",
            Self::PaymanAgent(_) => "PAYMAN_AGENT",
        }
    }
}

// ---------------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------------

/// Balance lookup result returned by the balance tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub spendable_balance: f64,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl From<BalanceSummary> for serde_json::Value {
    fn from(summary: BalanceSummary) -> Self {
        let mut body = serde_json::json!({
            "spendableBalance": summary.spendable_balance,
            "currency": summary.currency.code(),
        });
        if let Some(customer_id) = summary.customer_id {
            body["customerId"] = serde_json::Value::String(customer_id);
        }
        body
    }
}

// ---------------------------------------------------------------------------
// Host integration
// ---------------------------------------------------------------------------

/// A tool call request from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
    pub success: bool,
}
