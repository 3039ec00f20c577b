const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const UNIT_SIZE: u64 = 1024;

/// Binary-scaled size label rounded to two decimals, e.g. `1536` → `"1.5 KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // floor(log1024(bytes)) without float rounding surprises at exact powers.
    let exponent = ((u64::BITS - 1 - bytes.leading_zeros()) / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / UNIT_SIZE.pow(exponent) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[exponent as usize])
}
