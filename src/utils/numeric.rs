use once_cell::sync::Lazy;
use regex::Regex;

static A_RATIO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"A\((\d+(?:\.\d+)?)\)").expect("valid A-ratio pattern"));

/// Round half up to `digits` decimals.
///
/// The scaled value is re-rendered at 15 significant digits first, so
/// `2.345 * 100 = 234.49999999999997` is treated as `234.5`.
pub fn round_half_up(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = to_precision(value * factor);
    (scaled + 0.5).floor() / factor
}

fn to_precision(value: f64) -> f64 {
    format!("{:.14e}", value).parse().unwrap_or(value)
}

/// Credit unit; blank, malformed or non-positive units count as 1.
pub fn parse_unit(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(unit) if unit.is_finite() && unit > 0.0 => unit,
        _ => 1.0,
    }
}

/// Share of A grades from a distribution string such as `A(12.3)B(40.1)C(47.6)`.
pub fn parse_a_ratio(raw: &str) -> f64 {
    A_RATIO_PATTERN
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Σ(score × weight) / Σweight, or 0 when there is no weight at all.
pub fn weighted_average<I>(items: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_sum, total_weight) = items
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), (score, weight)| {
            (sum + score * weight, total + weight)
        });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Percentile rank of a class ranking, rounded to 2 decimals.
pub fn percentile_rank(rank: f64, same_rank: f64, student_count: f64) -> Option<f64> {
    if student_count <= 0.0 || rank <= 0.0 {
        return None;
    }
    let tied = (same_rank.max(1.0) - 1.0) / 2.0;
    Some(round_half_up((rank + tied) / student_count * 100.0, 2))
}
