pub mod balances;
pub mod payments;
pub mod schema;
pub mod traits;

pub use balances::{GET_CUSTOMER_BALANCE, GET_SPENDABLE_BALANCE};
pub use payments::{CREATE_PAYEE, INITIATE_CUSTOMER_DEPOSIT, SEARCH_DESTINATIONS, SEND_PAYMENT};
pub use traits::{Tool, ToolDefinition};

use crate::config::ToolKitConfig;
use crate::error::{PaykitError, Result};
use crate::payman::{PaymanClient, PaymentsApi};
use crate::types::{ToolCall, ToolResult};
use schema::ParameterSchema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Every tool name the toolkit registers.
pub const TOOL_NAMES: [&str; 6] = [
    SEND_PAYMENT,
    SEARCH_DESTINATIONS,
    CREATE_PAYEE,
    INITIATE_CUSTOMER_DEPOSIT,
    GET_CUSTOMER_BALANCE,
    GET_SPENDABLE_BALANCE,
];

// ---------------------------------------------------------------------------
// Tool definitions for the inference API
// ---------------------------------------------------------------------------

/// Build the list of tool definitions exposed to the inference model.
///
/// Needs no credentials, so hosts can advertise the tools before a client
/// exists.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let entries: [(&str, &str, Value); 6] = [
        (
            SEND_PAYMENT,
            payments::SEND_PAYMENT_DESCRIPTION,
            payments::send_payment_schema(),
        ),
        (
            SEARCH_DESTINATIONS,
            payments::SEARCH_DESTINATIONS_DESCRIPTION,
            payments::search_destinations_schema(),
        ),
        (
            CREATE_PAYEE,
            payments::CREATE_PAYEE_DESCRIPTION,
            payments::create_payee_schema(),
        ),
        (
            INITIATE_CUSTOMER_DEPOSIT,
            payments::INITIATE_CUSTOMER_DEPOSIT_DESCRIPTION,
            payments::initiate_customer_deposit_schema(),
        ),
        (
            GET_CUSTOMER_BALANCE,
            balances::GET_CUSTOMER_BALANCE_DESCRIPTION,
            balances::get_customer_balance_schema(),
        ),
        (
            GET_SPENDABLE_BALANCE,
            balances::GET_SPENDABLE_BALANCE_DESCRIPTION,
            balances::get_spendable_balance_schema(),
        ),
    ];
    entries
        .into_iter()
        .map(|(name, description, parameters)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A registered tool paired with its compiled parameter schema.
pub struct ToolHandle {
    tool: Box<dyn Tool>,
    schema: ParameterSchema,
}

impl ToolHandle {
    fn new(tool: Box<dyn Tool>) -> Result<Self> {
        let schema = ParameterSchema::compile(tool.name(), &tool.parameters_schema())?;
        Ok(Self { tool, schema })
    }

    pub fn name(&self) -> &'static str {
        self.tool.name()
    }

    pub fn definition(&self) -> ToolDefinition {
        self.tool.definition()
    }

    /// Check arguments without running the tool.
    pub fn validate(&self, args: &Value) -> Result<()> {
        self.schema.check(args)
    }

    /// Validate `args` and, only if they conform, run the tool.
    pub async fn execute(&self, args: Value) -> Result<Value> {
        let args = schema::normalize_args(args);
        self.validate(&args)?;
        self.tool.execute(args).await
    }
}

/// The fixed set of payments tools over one shared client.
pub struct ToolKit {
    tools: BTreeMap<&'static str, ToolHandle>,
}

impl ToolKit {
    /// Build the toolkit and its Payman client from config.
    ///
    /// Fails fast on an empty secret or unusable endpoint. No request is
    /// sent until a tool runs.
    pub fn build(config: ToolKitConfig) -> Result<Self> {
        let client = PaymanClient::new(&config)?;
        info!(
            "Payman toolkit ready (environment: {}, endpoint: {})",
            config.environment,
            client.base_url()
        );
        Self::with_client(Arc::new(client))
    }

    /// Build the toolkit over an existing client.
    pub fn with_client(client: Arc<dyn PaymentsApi>) -> Result<Self> {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(payments::SendPaymentTool::new(client.clone())),
            Box::new(payments::SearchDestinationsTool::new(client.clone())),
            Box::new(payments::CreatePayeeTool::new(client.clone())),
            Box::new(payments::InitiateCustomerDepositTool::new(client.clone())),
            Box::new(balances::GetCustomerBalanceTool::new(client.clone())),
            Box::new(balances::GetSpendableBalanceTool::new(client)),
        ];

        let mut registry = BTreeMap::new();
        for tool in tools {
            let handle = ToolHandle::new(tool)?;
            registry.insert(handle.name(), handle);
        }
        Ok(Self { tools: registry })
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ToolHandle> {
        self.tools.get(name)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(ToolHandle::definition).collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        let handle = self
            .get(name)
            .ok_or_else(|| PaykitError::UnknownTool(name.to_string()))?;
        let result = handle.execute(args).await;
        if let Err(e) = &result {
            if e.is_rejection() {
                warn!("Rejected {} call: {}", name, e);
            }
        }
        result
    }

    /// Execute a model-issued tool call, folding any failure into the
    /// result instead of returning it.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        info!("Dispatching tool call {} ({})", call.id, call.name);
        match self.execute(&call.name, call.arguments.clone()).await {
            Ok(value) => ToolResult {
                tool_call_id: call.id.clone(),
                output: value.to_string(),
                success: true,
            },
            Err(e) => ToolResult {
                tool_call_id: call.id.clone(),
                output: format!("Error: {}", e),
                success: false,
            },
        }
    }
}
