//! Get transaction by id tool.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBankTransactionByIdParams {
    /// The 36-character account UUID.
    pub account_id: String,
    /// The ID of the specific transaction to retrieve details for.
    pub transaction_id: String,
}

const OPERATION: Operation = Operation::new("fetching transaction details");

#[derive(Debug, Clone)]
pub struct GetBankTransactionByIdTool;

impl ToolSpec for GetBankTransactionByIdTool {
    type Context = MercuryContext;
    type Params = GetBankTransactionByIdParams;

    const NAME: &'static str = "get_bank_transaction_by_id";

    const DESCRIPTION: &'static str = "Retrieve detailed information about a specific transaction for a specific account, including counterparty information, transaction status, and any attachments.";

    fn handle(params: GetBankTransactionByIdParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let segments = [
                "account",
                params.account_id.as_str(),
                "transaction",
                params.transaction_id.as_str(),
            ];
            let request = context.get(&segments).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::testing::{RecordingClient, TEST_BASE_URL, args, context};
    use serde_json::json;

    #[tokio::test]
    async fn test_path_uses_both_ids_in_order() {
        let client = RecordingClient::ok(r#"{"id":"tx-9","amount":-42.0}"#);
        let tool = GetBankTransactionByIdTool::definition().unwrap().bind(context(client.clone()));

        let result = tool
            .invoke(args(json!({"transaction_id": "tx-9", "account_id": "acc-1"})))
            .await
            .unwrap();

        assert_eq!(result.content().unwrap()["id"], "tx-9");
        assert_eq!(
            client.last_request().url(),
            format!("{}/account/acc-1/transaction/tx-9", TEST_BASE_URL)
        );
    }

    #[tokio::test]
    async fn test_both_ids_are_required() {
        let tool = GetBankTransactionByIdTool::definition().unwrap().bind(context(RecordingClient::ok("{}")));

        let err = tool.invoke(args(json!({}))).await.unwrap_err();

        assert_eq!(err.fields(), vec!["account_id", "transaction_id"]);
    }
}
