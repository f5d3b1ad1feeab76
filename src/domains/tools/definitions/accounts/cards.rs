//! Get credit cards tool.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCreditCardsParams {
    /// Your 36-character account UUID.
    pub id: String,
}

const OPERATION: Operation = Operation::new("fetching credit cards");

#[derive(Debug, Clone)]
pub struct GetCreditCardsTool;

impl ToolSpec for GetCreditCardsTool {
    type Context = MercuryContext;
    type Params = GetCreditCardsParams;

    const NAME: &'static str = "get_credit_cards";

    const DESCRIPTION: &'static str = "Retrieve information about cards associated with a specific account. Note that status and physical card status are two separate concepts. Either one being set to something other than \"active\" could cause a transaction to be declined.";

    fn handle(params: GetCreditCardsParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context.get(&["account", params.id.as_str(), "cards"]).build();
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
    async fn test_fetches_cards_path() {
        let client = RecordingClient::ok(r#"{"cards":[]}"#);
        let tool = GetCreditCardsTool::definition().unwrap().bind(context(client.clone()));

        let result = tool.invoke(args(json!({"id": "acc-1"}))).await.unwrap();

        assert_eq!(result.content().unwrap(), &json!({"cards": []}));
        assert_eq!(
            client.last_request().url(),
            format!("{}/account/acc-1/cards", TEST_BASE_URL)
        );
    }

    #[tokio::test]
    async fn test_not_found_is_generic_http_error() {
        let client = RecordingClient::reply(404, "account not found");
        let tool = GetCreditCardsTool::definition().unwrap().bind(context(client));

        let result = tool.invoke(args(json!({"id": "nope"}))).await.unwrap();

        assert_eq!(
            result.message(),
            Some("Error fetching credit cards: HTTP error! status: 404 - account not found")
        );
    }
}
