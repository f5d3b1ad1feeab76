//! Payment recipient tools.

pub mod add;
pub mod list;

pub use add::{AccountType, AddPaymentRecipientParams, AddPaymentRecipientTool, PaymentMethod};
pub use list::GetPaymentRecipientsTool;
