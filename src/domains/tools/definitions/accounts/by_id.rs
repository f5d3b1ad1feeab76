//! Get bank account by id tool.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBankAccountByIdParams {
    /// Your 36-character account UUID.
    pub id: String,
}

const OPERATION: Operation = Operation::new("fetching bank account details");

#[derive(Debug, Clone)]
pub struct GetBankAccountByIdTool;

impl ToolSpec for GetBankAccountByIdTool {
    type Context = MercuryContext;
    type Params = GetBankAccountByIdParams;

    const NAME: &'static str = "get_bank_account_by_id";
    const DESCRIPTION: &'static str = "Retrieve information about a specific bank account.";

    fn handle(params: GetBankAccountByIdParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context.get(&["account", params.id.as_str()]).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
