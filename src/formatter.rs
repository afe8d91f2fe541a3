extern crate codepage_437;

use codepage_437::{IntoCp437, CP437_CONTROL};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use crate::{
    Error,
    BillingRecord, ReceiptRecord,
    barcode::{BarcodeRenderer, RawCode39},
    command::Command
};

/// Paper identity lines printed at the top of every document
const ORG_HEADER: [&str; 4] = [
    "DONA JOSEFA M. BULU-AN CAPARAN",
    "Water & Sanitation Assoc.",
    "Bulu-an, IPIL, Zambo. Sibugay",
    "TIN: 464-252-005-000"
];

/// Meter readings column widths: previous, present, usage
const READING_COLUMNS: (usize, usize, usize) = (10, 12, 10);

/// Formats an amount the way it appears on paper: `PHP` plus a fixed
/// two-decimal value, no thousands separators.
///
/// ```rust
/// use watsan_print::formatter::money;
///
/// assert_eq!("PHP 0.00", money(0.0));
/// assert_eq!("PHP 15.50", money(15.5));
/// assert_eq!("PHP 1234.57", money(1234.567));
/// ```
pub fn money(amount: f64) -> String {
    format!("PHP {:.2}", amount)
}

/// Reformats an ISO-ish date (`YYYY-MM-DD`, with or without a time part)
/// as `DD/MM/YYYY`. Anything that does not parse passes through unchanged.
///
/// ```rust
/// use watsan_print::formatter::short_date;
///
/// assert_eq!("15/02/2026", short_date("2026-02-15"));
/// assert_eq!("10/02/2026", short_date("2026-02-10T08:00:00"));
/// assert_eq!("not-a-date", short_date("not-a-date"));
/// ```
pub fn short_date(input: &str) -> String {
    let date_part = input.split('T').next().unwrap_or(input);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(date_part, "%Y-%m-%d %H:%M:%S") {
        return datetime.format("%d/%m/%Y").to_string();
    }
    input.to_string()
}

/// Renders a payment timestamp as `YYYY-MM-DD HH:MM:SS`, tolerating a `Z`
/// suffix or an offset. Unparseable input passes through unchanged.
pub fn receipt_datetime(input: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return datetime.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    for pattern in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, pattern) {
            return datetime.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    input.to_string()
}

/// Builds the esc/pos byte streams for receipts and bills.
///
/// The formatter holds no mutable state: each call maps a record to a fresh
/// byte vector, so it can be shared freely between callers. The line width
/// is fixed at 32 characters, matching the 58mm paper the association uses.
pub struct DocumentFormatter {
    width: usize,
    barcode: Box<dyn BarcodeRenderer + Send + Sync>
}

impl Default for DocumentFormatter {
    fn default() -> DocumentFormatter {
        DocumentFormatter::new()
    }
}

impl DocumentFormatter {
    pub fn new() -> DocumentFormatter {
        DocumentFormatter {
            width: 32,
            barcode: Box::new(RawCode39::default())
        }
    }

    /// Swaps the barcode strategy. The raw command renderer is the default;
    /// see [RasterCode39](crate::RasterCode39) for printers without GS k.
    pub fn with_barcode(mut self, renderer: Box<dyn BarcodeRenderer + Send + Sync>) -> DocumentFormatter {
        self.barcode = renderer;
        self
    }

    fn rule(&self) -> String {
        "-".repeat(self.width) + "\n"
    }

    fn double_rule(&self) -> String {
        "=".repeat(self.width) + "\n"
    }

    /// Centered fixed-width columns for the meter readings block
    fn reading_columns<A: std::fmt::Display, B: std::fmt::Display, C: std::fmt::Display>(&self, prev: A, present: B, usage: C) -> String {
        let (prev_w, present_w, usage_w) = READING_COLUMNS;
        format!("{:^3$}{:^4$}{:^5$}\n", prev, present, usage, prev_w, present_w, usage_w)
    }

    fn text(&self, target: &mut Vec<u8>, content: &str) -> Result<(), Error> {
        let mut encoded = content.to_string().into_cp437(&CP437_CONTROL).map_err(|_| Error::Encoding)?;
        target.append(&mut encoded);
        Ok(())
    }

    fn command(&self, target: &mut Vec<u8>, command: Command) {
        target.extend_from_slice(&command.as_bytes());
    }

    /// Formats a payment receipt, cut command included.
    pub fn receipt(&self, record: &ReceiptRecord) -> Result<Vec<u8>, Error> {
        let mut target = Vec::new();

        // Header
        self.command(&mut target, Command::AlignCenter);
        for line in ORG_HEADER.iter() {
            self.text(&mut target, &format!("{}\n", line))?;
        }
        self.text(&mut target, &self.rule())?;

        // Receipt info
        self.command(&mut target, Command::AlignLeft);
        self.text(&mut target, "RECEIPT\n")?;
        self.text(&mut target, &format!("Bill No : {}\n", record.bill_no))?;
        self.text(&mut target, &format!("Date    : {}\n", receipt_datetime(&record.created_at)))?;
        self.text(&mut target, &self.rule())?;

        // Customer and amounts
        let customer = record.customer_name.as_deref().unwrap_or("N/A");
        self.text(&mut target, &format!("Customer      : {}\n", customer))?;
        self.text(&mut target, &self.rule())?;
        self.text(&mut target, &format!("Amount Paid   : {}\n", money(record.amount_paid)))?;
        self.text(&mut target, &format!("Cash Received : {}\n", money(record.cash_received)))?;
        self.text(&mut target, &format!("Change        : {}\n", money(record.change)))?;
        self.text(&mut target, &self.rule())?;

        // Footer
        self.command(&mut target, Command::AlignCenter);
        self.text(&mut target, "Thank you for your payment!\n")?;
        self.command(&mut target, Command::Cut);

        Ok(target)
    }

    /// Formats a full bill, stamped with the current local time.
    ///
    /// `include_cutting` appends the cut guide, the barcode block keyed on
    /// the reference number, and the motto.
    pub fn bill(&self, record: &BillingRecord, include_cutting: bool) -> Result<Vec<u8>, Error> {
        self.bill_at(record, Local::now().naive_local(), include_cutting)
    }

    /// Same as [bill](DocumentFormatter::bill), with an explicit timestamp.
    pub fn bill_at(&self, record: &BillingRecord, now: NaiveDateTime, include_cutting: bool) -> Result<Vec<u8>, Error> {
        let mut target = Vec::new();

        // Header block with the statement banner
        self.command(&mut target, Command::AlignCenter);
        self.text(&mut target, "[LOGO PLACEHOLDER]\n\n")?;
        for line in ORG_HEADER.iter() {
            self.text(&mut target, &format!("{}\n", line))?;
        }
        self.text(&mut target, "\n")?;
        self.text(&mut target, &self.rule())?;
        self.command(&mut target, Command::BoldOn);
        self.text(&mut target, "STATEMENT OF ACCOUNT\n")?;
        self.command(&mut target, Command::BoldOff);
        self.text(&mut target, &self.rule())?;
        self.command(&mut target, Command::AlignLeft);
        self.text(&mut target, &self.rule())?;

        // Reference and print time
        let reference = record.reference_no.as_deref().unwrap_or("N/A");
        self.text(&mut target, &format!("Ref No       : {}\n", reference))?;
        self.text(&mut target, &format!("Date/Time    : {}\n", now.format("%m/%d/%y %I:%M%p")))?;
        self.text(&mut target, &self.rule())?;

        // Customer info
        self.text(&mut target, &format!("Customer : {}\n", record.customer_name))?;
        self.text(&mut target, &format!("Account  : {}\n", record.account_no))?;
        self.text(&mut target, &format!("Classification: {}\n", record.classification.as_deref().unwrap_or("N/A")))?;
        self.text(&mut target, &format!("Address  : {}\n", record.address.as_deref().unwrap_or("N/A")))?;
        self.text(&mut target, &self.rule())?;

        // Collector and penalty
        self.text(&mut target, &format!("Collector: {}\n", record.collector.as_deref().unwrap_or("N/A")))?;
        self.text(&mut target, &format!("Penalty  : {}\n", money(record.penalty)))?;
        self.text(&mut target, &self.rule())?;

        // Period covered, centered, ahead of the readings
        self.command(&mut target, Command::AlignCenter);
        self.text(&mut target, "Period Covered\n")?;
        self.text(&mut target, &format!("{}\n", record.period_covered.as_deref().unwrap_or("N/A")))?;
        self.text(&mut target, "\n")?;

        // Meter readings
        self.command(&mut target, Command::BoldOn);
        self.text(&mut target, "METER READINGS\n")?;
        self.command(&mut target, Command::BoldOff);
        self.text(&mut target, &self.reading_columns("Prev", "Present", "Usage"))?;
        self.text(&mut target, &self.reading_columns(record.prev_reading, record.curr_reading, record.usage()))?;
        self.text(&mut target, &self.rule())?;

        // Rate and total
        self.text(&mut target, &format!("Rate/m3  : {}\n", money(record.rate)))?;
        self.text(&mut target, "Seniors Citizen : PHP -20.00\n")?;
        self.text(&mut target, &self.double_rule())?;
        self.command(&mut target, Command::AlignCenter);
        self.command(&mut target, Command::BoldOn);
        self.text(&mut target, "*** TOTAL AMOUNT DUE ***\n")?;
        self.command(&mut target, Command::BoldOff);
        self.text(&mut target, &format!("{}\n", money(record.total())))?;
        self.text(&mut target, &self.double_rule())?;

        // Due and disconnection dates, below the total
        self.command(&mut target, Command::AlignLeft);
        let due = record.due_date.as_deref().unwrap_or("N/A");
        let disconnection = record.disconnection_date.as_deref().unwrap_or("N/A");
        self.text(&mut target, &format!("Due Date     : {}\n", short_date(due)))?;
        self.text(&mut target, &format!("Disconnection Date: {}\n", short_date(disconnection)))?;
        self.text(&mut target, &self.rule())?;

        // Reminders
        self.command(&mut target, Command::AlignLeft);
        self.text(&mut target, "\nREMAINDERS:\n")?;
        self.text(&mut target, "- Please pay by the due date to avoid disconnection.\n")?;
        self.text(&mut target, "- Bring this bill when paying.\n")?;
        self.text(&mut target, "- For inquiries, contact the office.\n")?;
        self.text(&mut target, &self.rule())?;

        // Footer message
        self.command(&mut target, Command::AlignCenter);
        self.text(&mut target, "\nPlease pay on or before due date\nto avoid penalties.\n\nThank you!\n")?;
        self.command(&mut target, Command::AlignLeft);

        if include_cutting {
            self.cutting_and_barcode(&mut target, record)?;
        }

        Ok(target)
    }

    /// Cut guide, barcode and motto, appended when staff need a detachable
    /// stub for cash payments.
    fn cutting_and_barcode(&self, target: &mut Vec<u8>, record: &BillingRecord) -> Result<(), Error> {
        let barcode = match self.barcode.code39(record.barcode_identifier()) {
            Ok(bytes) => bytes,
            Err(e) => {
                // A bill without its stub barcode still beats no bill
                log::warn!("Skipping barcode for {}: {}", record.account_no, e);
                Vec::new()
            }
        };

        self.text(target, "\n")?;
        self.command(target, Command::AlignCenter);
        self.text(target, "8< ------------------------------ \n")?;
        self.text(target, "\n\n\n")?;
        target.extend_from_slice(&barcode);
        self.text(target, "\n")?;
        self.text(target, "Save Water, Save Life!\n")?;
        self.text(target, "\n\n\n")?;
        self.command(target, Command::AlignLeft);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn sample_bill() -> BillingRecord {
        BillingRecord::builder("Juan Dela Cruz", "M001", 120, 128, 15.0)
            .reference_no("REF123456")
            .address("Makilas, IPIL")
            .classification("Residential")
            .collector("Pedro Santos")
            .period_covered("Jan 2026 - Feb 2026")
            .due_date("2026-02-01")
            .disconnection_date("2026-02-10")
            .build()
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 15).unwrap().and_hms_opt(14, 30, 0).unwrap()
    }

    #[test]
    fn bill_carries_usage_and_total_verbatim() {
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&sample_bill(), noon(), false).unwrap();
        let values_row = format!("{:^10}{:^12}{:^10}\n", 120, 128, 8);
        assert!(contains(&bytes, values_row.as_bytes()));
        assert!(contains(&bytes, b"PHP 120.00\n"));
        assert!(contains(&bytes, b"*** TOTAL AMOUNT DUE ***"));
    }

    #[test]
    fn bill_reformats_dates_and_stamps_the_clock() {
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&sample_bill(), noon(), false).unwrap();
        assert!(contains(&bytes, b"Due Date     : 01/02/2026\n"));
        assert!(contains(&bytes, b"Disconnection Date: 10/02/2026\n"));
        assert!(contains(&bytes, b"Date/Time    : 02/15/26 02:30PM\n"));
    }

    #[test]
    fn missing_optionals_render_as_na() {
        let record = BillingRecord::builder("Juan Dela Cruz", "M001", 120, 128, 15.0).build();
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&record, noon(), false).unwrap();
        assert!(contains(&bytes, b"Address  : N/A\n"));
        assert!(contains(&bytes, b"Classification: N/A\n"));
        assert!(contains(&bytes, b"Collector: N/A\n"));
        assert!(contains(&bytes, b"Ref No       : N/A\n"));
        assert!(contains(&bytes, b"Due Date     : N/A\n"));
    }

    #[test]
    fn unparseable_dates_pass_through() {
        let record = BillingRecord::builder("A", "M001", 0, 1, 1.0)
            .due_date("not-a-date")
            .build();
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&record, noon(), false).unwrap();
        assert!(contains(&bytes, b"Due Date     : not-a-date\n"));
    }

    #[test]
    fn cutting_section_keys_the_barcode_on_the_reference() {
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&sample_bill(), noon(), true).unwrap();
        assert!(contains(&bytes, b"8< ------------------------------ \n"));
        assert!(contains(&bytes, b"Save Water, Save Life!\n"));
        // GS k 4 with the reference number payload
        assert!(contains(&bytes, b"\x1dk\x04REF123456\x00"));

        let without = formatter.bill_at(&sample_bill(), noon(), false).unwrap();
        assert!(!contains(&without, b"8< "));
        assert!(without.len() < bytes.len());
    }

    #[test]
    fn cutting_section_falls_back_to_the_account_number() {
        let record = BillingRecord::builder("A", "D001", 0, 1, 1.0).build();
        let formatter = DocumentFormatter::new();
        let bytes = formatter.bill_at(&record, noon(), true).unwrap();
        assert!(contains(&bytes, b"\x1dk\x04D001\x00"));
    }

    #[test]
    fn receipt_layout_and_defaults() {
        let record = ReceiptRecord::new("000123", None, 120.0, 200.0, 80.0, "2026-02-15T14:30:00");
        let formatter = DocumentFormatter::new();
        let bytes = formatter.receipt(&record).unwrap();
        assert!(contains(&bytes, b"RECEIPT\n"));
        assert!(contains(&bytes, b"Bill No : 000123\n"));
        assert!(contains(&bytes, b"Date    : 2026-02-15 14:30:00\n"));
        assert!(contains(&bytes, b"Customer      : N/A\n"));
        assert!(contains(&bytes, b"Amount Paid   : PHP 120.00\n"));
        assert!(contains(&bytes, b"Cash Received : PHP 200.00\n"));
        assert!(contains(&bytes, b"Change        : PHP 80.00\n"));
        // Ends with the paper cut
        assert!(bytes.ends_with(&Command::Cut.as_bytes()));
    }

    #[test]
    fn receipt_passes_odd_timestamps_through() {
        let record = ReceiptRecord::new("000123", Some("Juan".to_string()), 1.0, 1.0, 0.0, "sometime");
        let bytes = DocumentFormatter::new().receipt(&record).unwrap();
        assert!(contains(&bytes, b"Date    : sometime\n"));
    }

    #[test]
    fn currency_is_always_two_decimals() {
        assert_eq!(money(0.0), "PHP 0.00");
        assert_eq!(money(15.5), "PHP 15.50");
        assert_eq!(money(1234.567), "PHP 1234.57");
        assert_eq!(money(3500.0), "PHP 3500.00");
    }

    #[test]
    fn short_date_handles_time_components() {
        assert_eq!(short_date("2026-02-15"), "15/02/2026");
        assert_eq!(short_date("2026-02-15T08:00:00"), "15/02/2026");
        assert_eq!(short_date("N/A"), "N/A");
    }
}
