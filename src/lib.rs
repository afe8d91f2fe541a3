//! Bill and receipt printing for the water & sanitation association.
//!
//! The crate turns structured billing data into raw esc/pos byte streams
//! for 58mm thermal printers, and packs logo images into the monochrome
//! byte arrays the metering firmware embeds.
//!
//! ```rust
//! use watsan_print::{DocumentFormatter, BillingRecord};
//!
//! let bill = BillingRecord::builder("Juan Dela Cruz", "M001", 120, 128, 15.0)
//!     .reference_no("REF123456")
//!     .due_date("2026-02-01")
//!     .build();
//! // Raw esc/pos bytes, ready for transmission
//! let bytes = DocumentFormatter::new().bill(&bill, true).unwrap();
//! assert!(!bytes.is_empty());
//! ```
//!
//! Transmission itself is a thin layer: the [Printer](crate::Printer)
//! structure opens one job per document, writes the whole payload, and
//! closes the job.
//!
//! ```rust,no_run
//! use watsan_print::{Printer, ReceiptRecord};
//!
//! let printer = Printer::network("192.168.1.50", 9100);
//! let receipt = ReceiptRecord::new(
//!     "000123", Some("Juan Dela Cruz".to_string()),
//!     120.0, 200.0, 80.0, "2026-02-15T14:30:00"
//! );
//! match printer.print_receipt(&receipt) {
//!     Ok(_) => (),
//!     Err(e) => println!("Error: {}", e)
//! }
//! ```
//!
//! ## Barcodes
//!
//! Bills can carry a CODE 39 stub barcode keyed on the reference number.
//! Printers with GS k support render it firmware-side through
//! [RawCode39](crate::RawCode39), the canonical strategy; for the rest,
//! [RasterCode39](crate::RasterCode39) draws the same symbol host-side and
//! ships it as a raster image.
//!
//! ## Logos
//!
//! [LogoBitmap](crate::LogoBitmap) scales and centers a picture on a fixed
//! canvas, binarizes it, and packs it 8 pixels per byte for embedding into
//! firmware read-only memory.

pub use document::{BillingRecord, BillingRecordBuilder, ReceiptRecord};
pub use formatter::DocumentFormatter;
pub use barcode::{BarcodeRenderer, RawCode39, RasterCode39};
pub use logo::LogoBitmap;
pub use printer::{Printer, PrinterConnection};
pub use error::Error;

/// Contains raw esc/pos commands
pub mod command;
/// Document formatting and display helpers
pub mod formatter;
/// Plain-text previews of formatted documents
pub mod preview;

mod barcode;
mod document;
mod error;
mod logo;
mod printer;
