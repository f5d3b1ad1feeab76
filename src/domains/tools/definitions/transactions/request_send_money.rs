//! Request send money tool.
//!
//! Creates a payment that waits for admin approval in the Mercury web app.
//! Unlike `send_money` it does not require IP whitelisting.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::core::api::IdempotencyKey;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RequestSendMoneyParams {
    /// The 36-character account UUID to send money from.
    pub account_id: String,
    /// The recipient ID to send money to.
    pub recipient_id: String,
    /// The amount to send in USD (positive number).
    #[schemars(with = "f64", extend("exclusiveMinimum" = 0))]
    pub amount: Number,
    /// An optional memo to be included with the transaction (visible to the recipient).
    pub memo: Option<String>,
    /// The payment method to use. Default is ACH.
    pub payment_method: Option<String>,
    /// A unique identifier for this request to prevent duplicates. If not provided, a UUID will be generated.
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestSendMoneyBody {
    recipient_id: String,
    amount: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<String>,
}

const OPERATION: Operation = Operation::new("requesting to send money").forbidden_message(
    "Permission error: Your API token doesn't have the 'Send Money with Approval' scope.",
);

#[derive(Debug, Clone)]
pub struct RequestSendMoneyTool;

impl ToolSpec for RequestSendMoneyTool {
    type Context = MercuryContext;
    type Params = RequestSendMoneyParams;

    const NAME: &'static str = "request_send_money";

    const DESCRIPTION: &'static str = "Create an ACH payment that requires admin approval from the Mercury web interface. Unlike the direct send_money tool, this endpoint does not require IP whitelisting when using a Custom token, so ask the user to clarify if they have whitelisted their IP.";

    fn handle(params: RequestSendMoneyParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let key = IdempotencyKey::provide(params.idempotency_key);
            let body = RequestSendMoneyBody {
                recipient_id: params.recipient_id,
                amount: params.amount,
                memo: params.memo,
                payment_method: params.payment_method,
            };
            let request = context
                .post(
                    &["account", params.account_id.as_str(), "request-send-money"],
                    key,
                )
                .json(&body)
                .build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
