//! List bank accounts tool.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

/// This tool takes no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

const OPERATION: Operation = Operation::new("fetching Mercury accounts");

/// Lists every depository account visible to the token.
#[derive(Debug, Clone)]
pub struct GetBankAccountsTool;

impl ToolSpec for GetBankAccountsTool {
    type Context = MercuryContext;
    type Params = NoParams;

    const NAME: &'static str = "get_bank_accounts";

    const DESCRIPTION: &'static str =
        "Retrieve information about your bank accounts (not including treasury accounts).";

    fn handle(_params: NoParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context.get(&["accounts"]).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
