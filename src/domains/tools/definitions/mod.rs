//! Tool definitions module.
//!
//! One file per Mercury endpoint, grouped by resource. Every tool is a unit
//! struct implementing [`ToolSpec`] with [`MercuryContext`] as its context.

pub mod accounts;
pub mod common;
pub mod context;
pub mod recipients;
pub mod statements;
pub mod transactions;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use accounts::{GetBankAccountByIdTool, GetBankAccountsTool, GetCreditCardsTool, GetTreasuryTool};
pub use context::{DEFAULT_BASE_URL, MercuryContext};
pub use recipients::{AddPaymentRecipientTool, GetPaymentRecipientsTool};
pub use statements::GetBankStatementsTool;
pub use transactions::{
    GetBankTransactionByIdTool, GetTransactionsTool, RequestSendMoneyTool, SendMoneyTool,
};

use super::definition::{BoundTool, ToolSpec};
use super::error::RegistryError;

/// Every Mercury tool bound to `context`, in advertised order.
pub fn mercury_tools(context: Arc<MercuryContext>) -> Result<Vec<BoundTool>, RegistryError> {
    Ok(vec![
        GetBankAccountsTool::definition()?.bind(Arc::clone(&context)),
        GetBankAccountByIdTool::definition()?.bind(Arc::clone(&context)),
        GetCreditCardsTool::definition()?.bind(Arc::clone(&context)),
        GetTreasuryTool::definition()?.bind(Arc::clone(&context)),
        GetTransactionsTool::definition()?.bind(Arc::clone(&context)),
        GetBankTransactionByIdTool::definition()?.bind(Arc::clone(&context)),
        GetBankStatementsTool::definition()?.bind(Arc::clone(&context)),
        SendMoneyTool::definition()?.bind(Arc::clone(&context)),
        RequestSendMoneyTool::definition()?.bind(Arc::clone(&context)),
        GetPaymentRecipientsTool::definition()?.bind(Arc::clone(&context)),
        AddPaymentRecipientTool::definition()?.bind(context),
    ])
}
