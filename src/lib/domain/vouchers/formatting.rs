//! Display helpers for voucher limits

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

const BYTE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB", "PB"];
const RATE_UNITS: &[&str] = &["bps", "Kbps", "Mbps", "Gbps", "Tbps"];

/// Formats a duration given in minutes as `1d 2h 30m`, leaving out zero parts.
pub fn time_convert(minutes: u64) -> String {
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let rest = minutes % MINUTES_PER_HOUR;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (rest, "m")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        return "0m".to_string();
    }

    parts.join(" ")
}

/// Formats a byte quantity or a bit rate with base-1000 units.
///
/// `unit_offset` is the unit `value` is already expressed in, e.g. `2` for
/// megabytes or `1` together with `per_second` for Kbps.
pub fn bytes_convert(value: u64, unit_offset: usize, per_second: bool) -> String {
    let units = if per_second { RATE_UNITS } else { BYTE_UNITS };
    let offset = unit_offset.min(units.len() - 1);

    if value == 0 {
        return format!("0 {}", units[offset]);
    }

    let mut scaled = value as f64;
    let mut index = offset;

    while scaled >= 1000.0 && index < units.len() - 1 {
        scaled /= 1000.0;
        index += 1;
    }

    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    format!("{trimmed} {}", units[index])
}
