//! Get treasury tool.

use std::sync::Arc;

use futures::FutureExt;

use super::list::NoParams;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

const OPERATION: Operation = Operation::new("fetching treasury information");

#[derive(Debug, Clone)]
pub struct GetTreasuryTool;

impl ToolSpec for GetTreasuryTool {
    type Context = MercuryContext;
    type Params = NoParams;

    const NAME: &'static str = "get_treasury";
    const DESCRIPTION: &'static str = "Retrieve treasury account information from Mercury.";

    fn handle(_params: NoParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context.get(&["treasury"]).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::testing::{RecordingClient, TEST_BASE_URL, context};

    #[tokio::test]
    async fn test_fetches_treasury() {
        let client = RecordingClient::ok(r#"{"accounts":[{"id":"t1"}]}"#);
        let tool = GetTreasuryTool::definition().unwrap().bind(context(client.clone()));

        let result = tool.invoke(None).await.unwrap();

        assert!(!result.is_error());
        assert_eq!(client.last_request().url(), format!("{}/treasury", TEST_BASE_URL));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_failure() {
        let client = RecordingClient::ok("not json");
        let tool = GetTreasuryTool::definition().unwrap().bind(context(client));

        let result = tool.invoke(None).await.unwrap();

        assert!(result
            .message()
            .unwrap()
            .starts_with("Error fetching treasury information: Failed to parse response body"));
    }
}
