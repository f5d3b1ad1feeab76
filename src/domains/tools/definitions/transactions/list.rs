//! List transactions tool.
//!
//! Filters map one-to-one onto query parameters. Absent or empty filters are
//! left out of the URL entirely.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::api::Query;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

/// Transaction status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Sent,
    Cancelled,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

/// Sort order on `createdAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTransactionsParams {
    /// The ID of the bank account to retrieve transactions for.
    pub account_id: String,
    /// Limit how many transactions to retrieve (default: 500)
    pub limit: Option<u64>,
    /// Number of most recent transactions to omit (default: 0)
    pub offset: Option<u64>,
    /// Filter transactions by status
    pub status: Option<TransactionStatus>,
    /// Earliest createdAt date to filter for (YYYY-MM-DD or ISO 8601)
    pub start: Option<String>,
    /// Latest createdAt date to filter for (YYYY-MM-DD or ISO 8601)
    pub end: Option<String>,
    /// Search term to look for in transaction descriptions
    pub search: Option<String>,
    /// Sort order for transactions based on createdAt date (default: desc)
    pub order: Option<SortOrder>,
}

impl GetTransactionsParams {
    /// Query string filters, in declaration order.
    fn query(&self) -> Query {
        Query::new()
            .param("limit", self.limit)
            .param("offset", self.offset)
            .param("status", self.status.map(|s| s.as_str()))
            .param("start", self.start.as_deref())
            .param("end", self.end.as_deref())
            .param("search", self.search.as_deref())
            .param("order", self.order.map(|o| o.as_str()))
    }
}

const OPERATION: Operation = Operation::new("fetching transactions");

#[derive(Debug, Clone)]
pub struct GetTransactionsTool;

impl ToolSpec for GetTransactionsTool {
    type Context = MercuryContext;
    type Params = GetTransactionsParams;

    const NAME: &'static str = "get_transactions";
    const DESCRIPTION: &'static str =
        "Retrieve incoming and outgoing money transactions for a specific bank account.";

    fn handle(params: GetTransactionsParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context
                .get(&["account", params.account_id.as_str(), "transactions"])
                .query(params.query())
                .build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
