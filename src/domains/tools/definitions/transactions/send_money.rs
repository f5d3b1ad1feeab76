//! Send money tool.
//!
//! Moves money immediately. Mercury only accepts this call from whitelisted
//! IPs, so a 403 explains how to whitelist rather than blaming the token.

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::core::api::IdempotencyKey;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

pub const IP_WHITELIST_MESSAGE: &str = "Mercury requires a whitelisted IP for this tool. Please go to https://app.mercury.com/settings/tokens to whitelist your IP. Please add the IP to the whitelist and try again.";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendMoneyParams {
    /// The 36-character account UUID to send money from.
    pub account_id: String,
    /// The recipient ID to send money to.
    pub recipient_id: String,
    /// The amount to send in USD (positive number).
    #[schemars(with = "f64", extend("exclusiveMinimum" = 0))]
    pub amount: Number,
    /// An optional internal note for the transaction (not visible to the recipient).
    pub note: Option<String>,
    /// An optional memo to be included with the transaction (visible to the recipient).
    pub external_memo: Option<String>,
    /// A unique identifier for this request to prevent duplicates. If not provided, a UUID will be generated.
    pub idempotency_key: Option<String>,
}

/// Upstream request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMoneyBody {
    recipient_id: String,
    amount: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_memo: Option<String>,
}

const OPERATION: Operation =
    Operation::new("sending money").forbidden_message(IP_WHITELIST_MESSAGE);

#[derive(Debug, Clone)]
pub struct SendMoneyTool;

impl ToolSpec for SendMoneyTool {
    type Context = MercuryContext;
    type Params = SendMoneyParams;

    const NAME: &'static str = "send_money";

    const DESCRIPTION: &'static str = "Create a new transaction for ACH payments. Note: This tool requires additional permissions and IP whitelisting with Mercury, so ask the user to clarify if they have whitelisted their IP first. If they have not, use the request_send_money tool instead. Only use for valid purposes like paying invoices or automating bill payments.";

    fn handle(params: SendMoneyParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let SendMoneyParams {
                account_id,
                recipient_id,
                amount,
                note,
                external_memo,
                idempotency_key,
            } = params;

            let body = SendMoneyBody {
                recipient_id,
                amount,
                note,
                external_memo,
            };
            let key = IdempotencyKey::provide(idempotency_key);
            let request = context
                .post(&["account", account_id.as_str(), "transactions"], key)
                .json(&body)
                .build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
