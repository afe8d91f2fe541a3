/// Errors that this crate throws.
#[derive(Debug)]
pub enum Error {
    /// Error regarding image treatment
    ImageError(image::ImageError),
    /// The logo canvas width must be a multiple of 8 to pack whole bytes
    MisalignedWidth(u32),
    /// For text printing, the content could not be mapped to cp437
    Encoding,
    /// The barcode payload contains bytes the symbology cannot encode
    InvalidBarcode(String),
    /// Io error while transmitting a print job
    IoError(std::io::Error),
    /// A transmission failed at the device boundary
    PrinterError(String)
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let content = match self {
            Error::ImageError(e) => format!("Image error: {}", e),
            Error::MisalignedWidth(width) => format!("Canvas width must be a multiple of 8, got {}", width),
            Error::Encoding => "An unsupported utf-8 character was found when passing to cp437".to_string(),
            Error::InvalidBarcode(detail) => format!("Cannot encode barcode payload: {}", detail),
            Error::IoError(e) => format!("Io error: {}", e),
            Error::PrinterError(detail) => format!("An error occured while printing, {}", detail)
        };
        write!(formatter, "{}", content)
    }
}

impl std::error::Error for Error{}
