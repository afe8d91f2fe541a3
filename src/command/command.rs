extern crate serde;

use serde::{Serialize, Deserialize};

/// Raw esc/pos commands understood by the target printers.
///
/// The byte values are fixed: the receipts and bills this crate produces are
/// consumed by 58mm POS printers that expect these exact sequences.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Command {
    /// Initializes the printer. Equivalent to ESC @
    Reset,
    /// Centers following text. Equivalent to ESC a 1
    AlignCenter,
    /// Left-aligns following text. Equivalent to ESC a 0
    AlignLeft,
    /// Equivalent to ESC E 1
    BoldOn,
    /// Equivalent to ESC E 0
    BoldOff,
    /// Full paper cut. Equivalent to GS V B 0
    Cut,
    /// Sets barcode height in dots. Equivalent to GS h n
    BarcodeHeight {
        dots: u8
    },
    /// Sets barcode module width in dots. Equivalent to GS w n
    BarcodeWidth {
        dots: u8
    },
    /// Hides the human readable text under barcodes. Equivalent to GS H 0
    HriOff,
    /// Prints a CODE 39 symbol for the given ASCII payload.
    /// Equivalent to GS k 4, terminated by a null byte
    Code39 {
        payload: String
    },
    /// Raster bit image header, normal scale. Equivalent to GS v 0 0;
    /// the caller appends `width_bytes * height` bytes of packed pixels
    Raster {
        width_bytes: u16,
        height: u16
    }
}

impl Command {
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Command::Reset => vec![0x1b, 0x40],
            Command::AlignCenter => vec![0x1b, 0x61, 0x01],
            Command::AlignLeft => vec![0x1b, 0x61, 0x00],
            Command::BoldOn => vec![0x1b, 0x45, 0x01],
            Command::BoldOff => vec![0x1b, 0x45, 0x00],
            Command::Cut => vec![0x1d, 0x56, 0x42, 0x00],
            Command::BarcodeHeight{dots} => vec![0x1d, 0x68, *dots],
            Command::BarcodeWidth{dots} => vec![0x1d, 0x77, *dots],
            Command::HriOff => vec![0x1d, 0x48, 0x00],
            Command::Code39{payload} => {
                let mut res = vec![0x1d, 0x6b, 0x04];
                res.extend_from_slice(payload.as_bytes());
                res.push(0x00);
                res
            },
            Command::Raster{width_bytes, height} => {
                vec![
                    0x1d, 0x76, 0x30, 0x00,
                    (width_bytes % 256) as u8, (width_bytes / 256) as u8,
                    (height % 256) as u8, (height / 256) as u8
                ]
            }
        }
    }
}
