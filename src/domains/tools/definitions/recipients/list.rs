//! List payment recipients tool.

use std::sync::Arc;

use futures::FutureExt;

use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::accounts::list::NoParams;
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

const OPERATION: Operation = Operation::new("fetching payment recipients").forbidden_message(
    "Permission error: Your API token doesn't have access to recipient information.",
);

#[derive(Debug, Clone)]
pub struct GetPaymentRecipientsTool;

impl ToolSpec for GetPaymentRecipientsTool {
    type Context = MercuryContext;
    type Params = NoParams;

    const NAME: &'static str = "get_payment_recipients";

    const DESCRIPTION: &'static str = "Retrieve information about all of your payment recipients in Mercury, including their banking details, routing information, payment methods, and status.";

    fn handle(_params: NoParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let request = context.get(&["recipients"]).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}
