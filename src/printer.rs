extern crate log;

use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs, Shutdown};
use std::path::PathBuf;
use std::time::Duration;

use log::{info, error};
use crate::{
    Error,
    BillingRecord, ReceiptRecord,
    DocumentFormatter,
    preview
};

/// Where a print job is transmitted to.
///
/// The usual production target is a raw TCP printer on port 9100. The other
/// variants exist for development: `File` captures the exact byte stream,
/// `Terminal` shows a de-controlled text preview on stdout.
#[derive(Clone, Debug)]
pub enum PrinterConnection {
    /// Raw network printer; one TCP connection per job
    Network {
        host: String,
        port: u16,
        /// Time to wait for the connection before giving up on the job
        timeout: Duration
    },
    /// Byte stream captured to a file, overwritten per job
    File {
        path: PathBuf
    },
    /// Text preview on stdout
    Terminal
}

/// A thermal printer to send bills and receipts to.
///
/// Every print is a single blocking transmission: the job is opened, the
/// whole payload is written, and the job is closed. A failed write fails
/// the job; there are no retries.
///
/// ```rust,no_run
/// use watsan_print::{Printer, BillingRecord};
///
/// let printer = Printer::network("192.168.1.50", 9100);
/// let bill = BillingRecord::builder("Juan Dela Cruz", "M001", 120, 128, 15.0).build();
/// printer.print_bill(&bill, true)?;
/// # Ok::<(), watsan_print::Error>(())
/// ```
pub struct Printer {
    connection: PrinterConnection,
    formatter: DocumentFormatter
}

impl Printer {
    pub fn new(connection: PrinterConnection) -> Printer {
        Printer {
            connection,
            formatter: DocumentFormatter::new()
        }
    }

    /// Printer reachable over raw TCP, usually port 9100.
    pub fn network<A: Into<String>>(host: A, port: u16) -> Printer {
        Printer::new(PrinterConnection::Network {
            host: host.into(),
            port,
            timeout: Duration::from_secs(5)
        })
    }

    /// Captures jobs to a file instead of a device.
    pub fn file<A: Into<PathBuf>>(path: A) -> Printer {
        Printer::new(PrinterConnection::File{path: path.into()})
    }

    /// Previews jobs as plain text on stdout.
    pub fn terminal() -> Printer {
        Printer::new(PrinterConnection::Terminal)
    }

    /// Replaces the document formatter, e.g. to swap the barcode strategy.
    pub fn with_formatter(mut self, formatter: DocumentFormatter) -> Printer {
        self.formatter = formatter;
        self
    }

    /// Formats and transmits a payment receipt.
    pub fn print_receipt(&self, record: &ReceiptRecord) -> Result<(), Error> {
        let content = self.formatter.receipt(record)?;
        self.raw(&content)
    }

    /// Formats and transmits a bill, optionally with the cut guide and
    /// barcode stub.
    pub fn print_bill(&self, record: &BillingRecord, include_cutting: bool) -> Result<(), Error> {
        let content = self.formatter.bill(record, include_cutting)?;
        self.raw(&content)
    }

    /// Names of the devices this printer can address.
    pub fn list_devices(&self) -> Vec<String> {
        match &self.connection {
            PrinterConnection::Network{host, port, ..} => vec![format!("{}:{}", host, port)],
            PrinterConnection::File{path} => vec![path.display().to_string()],
            PrinterConnection::Terminal => vec!["terminal".to_string()]
        }
    }

    /// Sends raw bytes as one job: the payload is written whole or the job
    /// counts as failed.
    pub fn raw<A: AsRef<[u8]>>(&self, bytes: A) -> Result<(), Error> {
        match &self.connection {
            PrinterConnection::Network{host, port, timeout} => {
                self.transmit(host, *port, *timeout, bytes.as_ref()).map_err(|e| {
                    error!("Print job to {}:{} failed: {}", host, port, e);
                    e
                })
            },
            PrinterConnection::File{path} => {
                std::fs::write(path, bytes.as_ref()).map_err(Error::IoError)?;
                info!("Captured {} bytes to {}", bytes.as_ref().len(), path.display());
                Ok(())
            },
            PrinterConnection::Terminal => {
                print!("{}", preview::decontrol(bytes.as_ref()));
                Ok(())
            }
        }
    }

    fn transmit(&self, host: &str, port: u16, timeout: Duration, payload: &[u8]) -> Result<(), Error> {
        let address = (host, port).to_socket_addrs().map_err(Error::IoError)?
            .next()
            .ok_or_else(|| Error::PrinterError(format!("no address for {}:{}", host, port)))?;
        let mut stream = TcpStream::connect_timeout(&address, timeout).map_err(Error::IoError)?;
        stream.set_write_timeout(Some(timeout)).map_err(Error::IoError)?;
        stream.write_all(payload).map_err(Error::IoError)?;
        stream.flush().map_err(Error::IoError)?;
        stream.shutdown(Shutdown::Both).map_err(Error::IoError)?;
        info!("Sent {} bytes to {}:{}", payload.len(), host, port);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_connection_captures_the_whole_payload() {
        let dir = std::env::temp_dir().join("watsan-print-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("receipt.bin");

        let printer = Printer::file(&path);
        let record = ReceiptRecord::new("000123", None, 120.0, 200.0, 80.0, "2026-02-15T14:30:00");
        printer.print_receipt(&record).unwrap();

        let written = std::fs::read(&path).unwrap();
        let expected = DocumentFormatter::new().receipt(&record).unwrap();
        assert_eq!(written, expected);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn device_listing_names_the_target() {
        assert_eq!(Printer::network("10.0.0.5", 9100).list_devices(), vec!["10.0.0.5:9100"]);
        assert_eq!(Printer::terminal().list_devices(), vec!["terminal"]);
    }

    #[test]
    fn network_failure_is_reported_once() {
        // Reserved TEST-NET address, nothing listens there
        let printer = Printer::new(PrinterConnection::Network {
            host: "192.0.2.1".to_string(),
            port: 9100,
            timeout: Duration::from_millis(50)
        });
        let record = ReceiptRecord::new("1", None, 0.0, 0.0, 0.0, "now");
        assert!(printer.print_receipt(&record).is_err());
    }
}
