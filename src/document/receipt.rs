extern crate serde;

use serde::{Serialize, Deserialize};

/// A payment receipt.
///
/// All fields are independent scalars; nothing is derived. As with
/// [BillingRecord](crate::BillingRecord), the field names match the wire
/// format of the frontend's `print` request body.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReceiptRecord {
    pub bill_no: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub amount_paid: f64,
    pub cash_received: f64,
    pub change: f64,
    /// Timestamp of the payment, ISO-ish. Re-rendered when it parses,
    /// passed through verbatim otherwise.
    pub created_at: String
}

impl ReceiptRecord {
    pub fn new<A: Into<String>, B: Into<String>>(bill_no: A, customer_name: Option<String>, amount_paid: f64, cash_received: f64, change: f64, created_at: B) -> ReceiptRecord {
        ReceiptRecord {
            bill_no: bill_no.into(),
            customer_name,
            amount_paid,
            cash_received,
            change,
            created_at: created_at.into()
        }
    }
}
