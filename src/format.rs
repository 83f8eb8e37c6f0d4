//! Number formatting for table cells (en-US conventions only).

/// Shown when a cell has no value.
pub const EMPTY_CELL: &str = "—";

/// Compact count: `1.23M`, `45.6K`, or the plain number below 1,000.
pub fn fmt_num(n: Option<f64>) -> String {
    match n {
        None => EMPTY_CELL.to_string(),
        Some(n) if n.is_nan() => EMPTY_CELL.to_string(),
        Some(n) if n >= 1_000_000.0 => format!("{:.2}M", n / 1_000_000.0),
        Some(n) if n >= 1_000.0 => format!("{:.1}K", n / 1_000.0),
        Some(n) => format!("{}", n),
    }
}

/// Growth magnitude with one decimal; direction is carried separately.
pub fn fmt_growth(g: f64) -> String {
    format!("{:.1}%", g.abs())
}

/// Amount in $M with two decimals, e.g. `$12.40M` or `-$3.10M`.
pub fn fmt_millions(amount: Option<f64>) -> String {
    match amount {
        None => EMPTY_CELL.to_string(),
        Some(a) if a < 0.0 => format!("-${:.2}M", a.abs()),
        Some(a) => format!("${:.2}M", a),
    }
}

pub fn is_positive(g: f64) -> bool {
    g >= 0.0
}
