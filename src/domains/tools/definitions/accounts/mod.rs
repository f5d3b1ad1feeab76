//! Account tools.
//!
//! - `list`: all bank accounts
//! - `by_id`: one bank account
//! - `cards`: cards attached to an account
//! - `treasury`: treasury account information

pub mod by_id;
pub mod cards;
pub mod list;
pub mod treasury;

pub use by_id::{GetBankAccountByIdParams, GetBankAccountByIdTool};
pub use cards::{GetCreditCardsParams, GetCreditCardsTool};
pub use list::GetBankAccountsTool;
pub use treasury::GetTreasuryTool;
