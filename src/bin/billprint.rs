//! Test harness for the thermal printer: `dummy` renders a readable
//! preview of both document kinds to a text file, `print` sends a live
//! sample bill to the configured device.

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, ValueEnum};
use watsan_print::{BillingRecord, DocumentFormatter, Error, Printer, ReceiptRecord, preview};

#[derive(Clone, Debug, ValueEnum)]
enum Mode {
    /// Write a text preview of a receipt and a bill to a file
    Dummy,
    /// Send a live bill to the device
    Print
}

#[derive(Parser, Debug)]
#[command(name = "billprint", about = "Thermal printer test harness")]
struct Args {
    #[arg(long, value_enum, default_value = "dummy")]
    mode: Mode,
    /// Device address as host:port
    #[arg(long, default_value = "192.168.1.50:9100")]
    device: String,
    /// Preview output path for dummy mode
    #[arg(long, default_value = "receipt_preview.txt")]
    out: PathBuf
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

fn run(args: Args) -> Result<(), Error> {
    match args.mode {
        Mode::Dummy => {
            let formatter = DocumentFormatter::new();
            let bill = sample_bill();

            let paid = (bill.usage() as f64) * bill.rate;
            let receipt = ReceiptRecord::new(
                "000123",
                Some(bill.customer_name.clone()),
                paid,
                paid,
                0.0,
                Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
            );

            let receipt_bytes = formatter.receipt(&receipt)?;
            let bill_bytes = formatter.bill(&bill, true)?;

            let preview_text = format!(
                "{}\n\n--- FULL BILL ---\n\n{}",
                preview::decontrol(&receipt_bytes),
                preview::decontrol(&bill_bytes)
            );
            std::fs::write(&args.out, preview_text).map_err(Error::IoError)?;
            println!("Wrote text preview to: {}", args.out.display());
        },
        Mode::Print => {
            let (host, port) = parse_device(&args.device)?;
            let printer = Printer::network(host, port);
            // Live prints skip the cutting section to avoid wasting paper
            printer.print_bill(&sample_bill(), false)?;
            println!("Print sent");
        }
    }
    Ok(())
}

fn parse_device(device: &str) -> Result<(String, u16), Error> {
    let mut parts = device.rsplitn(2, ':');
    let port = parts.next().and_then(|p| p.parse().ok());
    match (parts.next(), port) {
        (Some(host), Some(port)) if !host.is_empty() => Ok((host.to_string(), port)),
        _ => Err(Error::PrinterError(format!("invalid device address '{}', expected host:port", device)))
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
