use crate::{Error, command::Command};

/// CODE 39 element widths, nine per symbol, bars and spaces alternating and
/// starting with a bar. `n` is a narrow element, `w` a wide one.
const CODE39_TABLE: [(char, &str); 44] = [
    ('0', "nnnwwnwnn"), ('1', "wnnwnnnnw"), ('2', "nnwwnnnnw"), ('3', "wnwwnnnnn"),
    ('4', "nnnwwnnnw"), ('5', "wnnwwnnnn"), ('6', "nnwwwnnnn"), ('7', "nnnwnnwnw"),
    ('8', "wnnwnnwnn"), ('9', "nnwwnnwnn"), ('A', "wnnnnwnnw"), ('B', "nnwnnwnnw"),
    ('C', "wnwnnwnnn"), ('D', "nnnnwwnnw"), ('E', "wnnnwwnnn"), ('F', "nnwnwwnnn"),
    ('G', "nnnnnwwnw"), ('H', "wnnnnwwnn"), ('I', "nnwnnwwnn"), ('J', "nnnnwwwnn"),
    ('K', "wnnnnnnww"), ('L', "nnwnnnnww"), ('M', "wnwnnnnwn"), ('N', "nnnnwnnww"),
    ('O', "wnnnwnnwn"), ('P', "nnwnwnnwn"), ('Q', "nnnnnnwww"), ('R', "wnnnnnwwn"),
    ('S', "nnwnnnwwn"), ('T', "nnnnwnwwn"), ('U', "wwnnnnnnw"), ('V', "nwwnnnnnw"),
    ('W', "wwwnnnnnn"), ('X', "nwnnwnnnw"), ('Y', "wwnnwnnnn"), ('Z', "nwwnwnnnn"),
    ('-', "nwnnnnwnw"), ('.', "wwnnnnwnn"), (' ', "nwwnnnwnn"), ('*', "nwnnwnwnn"),
    ('$', "nwnwnwnnn"), ('/', "nwnwnnnwn"), ('+', "nwnnnwnwn"), ('%', "nnnwnwnwn")
];

fn code39_pattern(symbol: char) -> Option<&'static str> {
    CODE39_TABLE.iter().find(|(c, _)| *c == symbol).map(|(_, pattern)| *pattern)
}

fn validate_payload(payload: &str) -> Result<(), Error> {
    if payload.is_empty() {
        return Err(Error::InvalidBarcode("empty payload".to_string()));
    }
    for symbol in payload.chars() {
        if symbol == '*' || code39_pattern(symbol).is_none() {
            return Err(Error::InvalidBarcode(format!("'{}' is outside the CODE 39 set", symbol)));
        }
    }
    Ok(())
}

/// Strategy for turning a textual identifier into printable barcode bytes.
///
/// Both implementations produce an equivalent CODE 39 symbol on paper:
/// [RawCode39](crate::RawCode39) delegates the drawing to the printer
/// firmware and is the canonical choice, [RasterCode39](crate::RasterCode39)
/// draws the symbol host-side for printers whose firmware lacks GS k.
pub trait BarcodeRenderer {
    fn code39(&self, payload: &str) -> Result<Vec<u8>, Error>;
}

/// Emits the protocol-level barcode commands and lets the printer render
/// the symbol: bar height, module width, human-readable text off, then the
/// CODE 39 print command with the ASCII payload.
#[derive(Clone, Debug)]
pub struct RawCode39 {
    /// Bar height in dots
    pub height: u8,
    /// Narrow module width in dots
    pub module_width: u8
}

impl Default for RawCode39 {
    fn default() -> RawCode39 {
        RawCode39 {
            height: 100,
            module_width: 2
        }
    }
}

impl BarcodeRenderer for RawCode39 {
    fn code39(&self, payload: &str) -> Result<Vec<u8>, Error> {
        validate_payload(payload)?;
        let mut target = Vec::new();
        target.extend_from_slice(&Command::BarcodeHeight{dots: self.height}.as_bytes());
        target.extend_from_slice(&Command::BarcodeWidth{dots: self.module_width}.as_bytes());
        target.extend_from_slice(&Command::HriOff.as_bytes());
        target.extend_from_slice(&Command::Code39{payload: payload.to_string()}.as_bytes());
        Ok(target)
    }
}

/// Renders the CODE 39 modules host-side and ships them as a raster image.
///
/// Wide elements are three narrow modules, symbols are separated by one
/// narrow gap, and the payload is wrapped in the `*` start/stop symbol.
#[derive(Clone, Debug)]
pub struct RasterCode39 {
    /// Bar height in dots
    pub height: u16,
    /// Narrow module width in dots
    pub module_width: u8
}

impl Default for RasterCode39 {
    fn default() -> RasterCode39 {
        RasterCode39 {
            height: 100,
            module_width: 2
        }
    }
}

impl RasterCode39 {
    /// One row of the symbol as booleans, true for ink.
    fn modules(&self, payload: &str) -> Vec<bool> {
        let narrow = self.module_width as usize;
        let framed = format!("*{}*", payload);
        let mut row = Vec::new();
        for (index, symbol) in framed.chars().enumerate() {
            if index > 0 {
                // Inter-character gap
                row.extend(std::iter::repeat(false).take(narrow));
            }
            // Unwrap is safe, the payload was validated against the table
            let pattern = code39_pattern(symbol).unwrap();
            for (element, width) in pattern.chars().enumerate() {
                let dots = if width == 'w' { 3 * narrow } else { narrow };
                let ink = element % 2 == 0;
                row.extend(std::iter::repeat(ink).take(dots));
            }
        }
        row
    }
}

impl BarcodeRenderer for RasterCode39 {
    fn code39(&self, payload: &str) -> Result<Vec<u8>, Error> {
        validate_payload(payload)?;
        let row = self.modules(payload);
        let width_bytes = ((row.len() + 7) / 8) as u16;

        // Pack one row most-significant bit first, white-padded to the byte
        let mut packed_row = vec![0u8; width_bytes as usize];
        for (x, ink) in row.iter().enumerate() {
            if *ink {
                packed_row[x / 8] |= 0x80 >> (x % 8);
            }
        }

        let mut target = Command::Raster{width_bytes, height: self.height}.as_bytes();
        for _ in 0..self.height {
            target.extend_from_slice(&packed_row);
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_block_for_d001_is_reproducible() {
        let renderer = RawCode39::default();
        let bytes = renderer.code39("D001").unwrap();
        assert_eq!(bytes, vec![
            0x1d, 0x68, 100,       // GS h: bar height
            0x1d, 0x77, 2,         // GS w: module width
            0x1d, 0x48, 0,         // GS H: no human readable text
            0x1d, 0x6b, 4, b'D', b'0', b'0', b'1', 0x00
        ]);
        assert_eq!(bytes, renderer.code39("D001").unwrap());
    }

    #[test]
    fn raw_rejects_unencodable_payloads() {
        let renderer = RawCode39::default();
        assert!(renderer.code39("d001").is_err());
        assert!(renderer.code39("").is_err());
        assert!(renderer.code39("A*B").is_err());
    }

    #[test]
    fn every_symbol_has_three_wide_elements() {
        for (symbol, pattern) in CODE39_TABLE.iter() {
            assert_eq!(pattern.len(), 9, "bad length for {}", symbol);
            let wide = pattern.chars().filter(|c| *c == 'w').count();
            assert_eq!(wide, 3, "bad wide count for {}", symbol);
        }
    }

    #[test]
    fn raster_dimensions_match_the_module_count() {
        let renderer = RasterCode39::default();
        let bytes = renderer.code39("D001").unwrap();
        // 6 framed symbols of 15 modules each plus 5 single-module gaps,
        // at 2 dots per module
        let dots = (6 * 15 + 5) * 2;
        let width_bytes = (dots + 7) / 8;
        assert_eq!(&bytes[..8], &Command::Raster{
            width_bytes: width_bytes as u16,
            height: 100
        }.as_bytes()[..]);
        assert_eq!(bytes.len(), 8 + width_bytes * 100);
    }

    #[test]
    fn raster_rows_are_identical_and_start_with_ink() {
        let renderer = RasterCode39 { height: 2, module_width: 1 };
        let bytes = renderer.code39("A").unwrap();
        let data = &bytes[8..];
        let (first, second) = data.split_at(data.len() / 2);
        assert_eq!(first, second);
        // The start symbol begins with a narrow bar
        assert_eq!(first[0] & 0x80, 0x80);
    }

    #[test]
    fn raster_rejects_unencodable_payloads() {
        let renderer = RasterCode39::default();
        assert!(renderer.code39("ref#1").is_err());
    }
}
