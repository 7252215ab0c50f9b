pub mod countdown;
pub mod transaction_dialog;

pub use countdown::Countdown;
pub use transaction_dialog::{DialogState, TransactionDialog};
