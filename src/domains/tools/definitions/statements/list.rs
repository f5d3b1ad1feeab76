//! List bank statements tool.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::api::Query;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBankStatementsParams {
    /// Your 36-character account UUID.
    pub account_id: String,
    /// Filter the statements so that their startDate is equal to or later than this date. Format: YYYY-MM-DD.
    pub start: Option<String>,
    /// Filter the statements so that their endDate is less than or equal to this date. Format: YYYY-MM-DD.
    pub end: Option<String>,
}

const OPERATION: Operation = Operation::new("fetching bank statements");

#[derive(Debug, Clone)]
pub struct GetBankStatementsTool;

impl ToolSpec for GetBankStatementsTool {
    type Context = MercuryContext;
    type Params = GetBankStatementsParams;

    const NAME: &'static str = "get_bank_statements";

    const DESCRIPTION: &'static str = "Retrieve statement information for a depository account in a given time period (Note: For now, treasury and credit accounts are not supported on this endpoint).";

    fn handle(params: GetBankStatementsParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let query = Query::new()
                .param("start", params.start.as_deref())
                .param("end", params.end.as_deref());
            let request = context
                .get(&["account", params.account_id.as_str(), "statements"])
                .query(query)
                .build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
