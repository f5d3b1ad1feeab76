//! Transaction tools.
//!
//! Reads (`list`, `by_id`) and the two money movement operations
//! (`send_money`, `request_send_money`). The latter are mutating and carry an
//! idempotency key.

pub mod by_id;
pub mod list;
pub mod request_send_money;
pub mod send_money;

pub use by_id::{GetBankTransactionByIdParams, GetBankTransactionByIdTool};
pub use list::{GetTransactionsParams, GetTransactionsTool, SortOrder, TransactionStatus};
pub use request_send_money::{RequestSendMoneyParams, RequestSendMoneyTool};
pub use send_money::{SendMoneyParams, SendMoneyTool};
