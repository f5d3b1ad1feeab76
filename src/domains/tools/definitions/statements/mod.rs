//! Statement tools.

pub mod list;

pub use list::{GetBankStatementsParams, GetBankStatementsTool};
