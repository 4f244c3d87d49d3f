use colored::{ColoredString, Colorize};

/// Human-readable byte count: whole bytes below 1 KB, one decimal for KB,
/// two above that.
pub fn format_size(bytes: u64) -> String {
    const STEP: f64 = 1024.0;
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / STEP;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }
    let precision = if unit == 0 { 1 } else { 2 };
    format!("{:.*} {}", precision, value, UNITS[unit])
}

/// Size string colored by how much space is at stake.
pub fn format_size_colored(bytes: u64) -> ColoredString {
    const MIB: u64 = 1024 * 1024;
    let s = format_size(bytes);
    if bytes >= 1024 * MIB {
        s.red().bold()
    } else if bytes >= 100 * MIB {
        s.yellow()
    } else {
        s.white()
    }
}

/// "1 file" / "n files"
pub fn format_count(count: usize) -> String {
    match count {
        1 => "1 file".to_string(),
        n => format!("{} files", n),
    }
}

/// Elapsed seconds as ms / s / m+s, whichever reads best.
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor() as u64;
        format!("{}m {:.0}s", mins, secs - (mins as f64 * 60.0))
    }
}
