use crate::error::{SyncError, SyncResult};

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1").
/// Returns (row, column) as 0-based indices.
pub fn parse_a1(address: &str) -> SyncResult<(u32, u32)> {
    let upper = address.trim().to_uppercase();
    let bytes = upper.as_bytes();

    // Find where column letters end and row digits begin
    let mut split = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            split = i;
            break;
        }
    }

    if split == 0 {
        return Err(SyncError::InvalidAddress(address.to_string()));
    }

    let col_part = &upper[..split];
    let row_part = &upper[split..];

    let col = parse_column_letters(col_part)
        .ok_or_else(|| SyncError::InvalidAddress(address.to_string()))?;
    let row: u32 = row_part
        .parse()
        .map_err(|_| SyncError::InvalidAddress(address.to_string()))?;

    // Rows are 1-based in A1 notation
    if row == 0 {
        return Err(SyncError::InvalidAddress(address.to_string()));
    }

    Ok((row - 1, col))
}

/// Convert column letters to a 0-based column index.
/// A=0, B=1, ... Z=25, AA=26, AB=27, ...
fn parse_column_letters(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for &b in letters.as_bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add(u32::from(b - b'A') + 1)?;
    }

    Some(col - 1)
}

/// Convert a 0-based column index to column letters.
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_letters(mut col: u32) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, char::from((col % 26) as u8 + b'A'));
        col /= 26;
    }

    result
}

/// Convert 0-based (row, col) to A1 notation.
pub fn to_a1(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row + 1)
}
