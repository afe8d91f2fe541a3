pub use self::billing::{BillingRecord, BillingRecordBuilder};
pub use self::receipt::ReceiptRecord;

mod billing;
mod receipt;
