extern crate serde;

use serde::{Serialize, Deserialize};

/// A single water bill, as handed over by the billing system.
///
/// The field names follow the wire format of the billing frontend, so the
/// structure deserializes straight out of a `print-bill` request body.
/// Optional fields render as `N/A` when absent; the meter readings and the
/// rate are required by construction.
///
/// ```rust
/// use watsan_print::BillingRecord;
///
/// let bill = BillingRecord::builder("Juan Dela Cruz", "M001", 120, 128, 15.0)
///     .reference_no("REF123456")
///     .build();
/// assert_eq!(bill.usage(), 8);
/// assert_eq!(bill.total(), 120.0);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BillingRecord {
    pub customer_name: String,
    pub account_no: String,
    pub prev_reading: i64,
    pub curr_reading: i64,
    /// Rate in PHP per cubic meter
    pub rate: f64,
    #[serde(default)]
    pub penalty: f64,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub collector: Option<String>,
    #[serde(default)]
    pub period_covered: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub disconnection_date: Option<String>
}

impl BillingRecord {
    /// Constructs a new billing record builder with the required fields.
    pub fn builder<A: Into<String>, B: Into<String>>(customer_name: A, account_no: B, prev_reading: i64, curr_reading: i64, rate: f64) -> BillingRecordBuilder {
        BillingRecordBuilder::new(customer_name, account_no, prev_reading, curr_reading, rate)
    }

    /// Cubic meters consumed in the covered period
    pub fn usage(&self) -> i64 {
        self.curr_reading - self.prev_reading
    }

    /// Amount due: usage times rate, plus penalty
    pub fn total(&self) -> f64 {
        (self.usage() as f64) * self.rate + self.penalty
    }

    /// Identifier encoded in the bill's barcode: the reference number, or
    /// the account number when no reference was assigned.
    pub fn barcode_identifier(&self) -> &str {
        self.reference_no.as_deref().unwrap_or(&self.account_no)
    }
}

/// Builder for [BillingRecord](crate::BillingRecord), defaulting every optional field.
pub struct BillingRecordBuilder {
    record: BillingRecord
}

impl BillingRecordBuilder {
    pub fn new<A: Into<String>, B: Into<String>>(customer_name: A, account_no: B, prev_reading: i64, curr_reading: i64, rate: f64) -> BillingRecordBuilder {
        BillingRecordBuilder {
            record: BillingRecord {
                customer_name: customer_name.into(),
                account_no: account_no.into(),
                prev_reading,
                curr_reading,
                rate,
                penalty: 0.0,
                reference_no: None,
                address: None,
                classification: None,
                collector: None,
                period_covered: None,
                due_date: None,
                disconnection_date: None
            }
        }
    }

    pub fn penalty(mut self, penalty: f64) -> Self {
        self.record.penalty = penalty;
        self
    }

    pub fn reference_no<A: Into<String>>(mut self, reference_no: A) -> Self {
        self.record.reference_no = Some(reference_no.into());
        self
    }

    pub fn address<A: Into<String>>(mut self, address: A) -> Self {
        self.record.address = Some(address.into());
        self
    }

    pub fn classification<A: Into<String>>(mut self, classification: A) -> Self {
        self.record.classification = Some(classification.into());
        self
    }

    pub fn collector<A: Into<String>>(mut self, collector: A) -> Self {
        self.record.collector = Some(collector.into());
        self
    }

    pub fn period_covered<A: Into<String>>(mut self, period_covered: A) -> Self {
        self.record.period_covered = Some(period_covered.into());
        self
    }

    pub fn due_date<A: Into<String>>(mut self, due_date: A) -> Self {
        self.record.due_date = Some(due_date.into());
        self
    }

    pub fn disconnection_date<A: Into<String>>(mut self, disconnection_date: A) -> Self {
        self.record.disconnection_date = Some(disconnection_date.into());
        self
    }

    pub fn build(self) -> BillingRecord {
        self.record
    }
}
