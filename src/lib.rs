//! Paykit: the Payman payments API as LLM-callable tools.
//!
//! [`ToolKit::build`] takes an API secret and environment, creates one
//! Payman client and registers six tools over it: `sendPayment`,
//! `searchDestinations`, `createPayee`, `initiateCustomerDeposit`,
//! `getCustomerBalance` and `getSpendableBalance`. Each tool publishes a
//! JSON Schema, validates incoming arguments against it and forwards them
//! to the client.

pub mod config;
pub mod error;
pub mod payman;
pub mod tools;
pub mod types;

pub use config::ToolKitConfig;
pub use error::{BackendError, PaykitError, Result};
pub use payman::{PaymanClient, PaymentsApi};
pub use tools::{tool_definitions, Tool, ToolDefinition, ToolKit, TOOL_NAMES};
pub use types::Environment;
