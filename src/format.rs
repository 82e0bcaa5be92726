//! Display formatting for raw record values. Pure functions, no state.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Whole US dollars with thousands separators. Missing or zero amounts read `$0`.
pub fn currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return "$0".to_string();
    };
    let rounded = amount.round();
    if rounded == 0.0 {
        return "$0".to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Compact form for narrow columns: `$1.2M`, `$350K`, `$900`.
pub fn currency_short(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return "$0".to_string();
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.0}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

pub fn percent(rate: f64) -> String {
    if !rate.is_finite() {
        return "0%".to_string();
    }
    format!("{:.1}%", rate)
}

pub fn probability(p: Option<u8>) -> String {
    match p {
        Some(p) => format!("{}%", p),
        None => "N/A".to_string(),
    }
}

/// `Some("")` and `None` both render as `N/A`.
pub fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12 padding:zero]:[minute padding:zero] [period]"
);

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

const NAIVE_DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const NAIVE_DATETIME_SUBSEC_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

/// Parses a finite number, allowing thousands separators only in
/// well-formed groups of three (`1,500.50`, not `1,5` or `15,00`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.contains(',') {
        let unsigned = raw.strip_prefix(['-', '+']).unwrap_or(raw);
        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
        let mut groups = whole.split(',');
        let lead = groups.next().unwrap_or_default();
        let grouped = (1..=3).contains(&lead.len())
            && digits(lead)
            && groups.all(|g| g.len() == 3 && digits(g));
        if !grouped || frac.contains(',') {
            return None;
        }
    }
    raw.replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses the date shapes the backend emits: `YYYY-MM-DD`, RFC 3339, or a
/// timestamp without offset (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt);
    }
    for fmt in [NAIVE_DATETIME_FORMAT, NAIVE_DATETIME_SUBSEC_FORMAT] {
        if let Ok(dt) = PrimitiveDateTime::parse(raw, fmt) {
            return Some(dt.assume_utc());
        }
    }
    parse_date(raw).map(|d| d.midnight().assume_utc())
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), ISO_DATE_FORMAT).ok()
}

/// `Mar 5, 2025`; `N/A` when missing; the raw text when it cannot be parsed.
pub fn date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "N/A".to_string();
    };
    parse_timestamp(raw)
        .and_then(|dt| dt.format(DATE_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// `Mar 5, 2025, 02:30 PM` (UTC).
pub fn datetime(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "N/A".to_string();
    };
    parse_timestamp(raw)
        .and_then(|dt| dt.format(DATETIME_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}

pub fn time_of_day(dt: OffsetDateTime) -> String {
    dt.format(DATETIME_FORMAT)
        .ok()
        .and_then(|s| s.rsplit(", ").next().map(str::to_string))
        .unwrap_or_default()
}

/// Colour family for a stage badge. The renderer maps tones to terminal colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Gray,
    Blue,
    Indigo,
    Purple,
    Yellow,
    Orange,
    Green,
    Red,
}

const STAGE_NAMES: [&str; 8] = [
    "Prospecting",
    "Qualification",
    "Needs Analysis",
    "Value Proposition",
    "Proposal/Price Quote",
    "Negotiation/Review",
    "Closed Won",
    "Closed Lost",
];

const STAGE_TONES: [Tone; 8] = [
    Tone::Gray,
    Tone::Blue,
    Tone::Indigo,
    Tone::Purple,
    Tone::Yellow,
    Tone::Orange,
    Tone::Green,
    Tone::Red,
];

/// Pipeline stage names offered by the form, in pipeline order.
pub fn stage_names() -> &'static [&'static str] {
    &STAGE_NAMES
}

/// Stage numbers are 1-based positions in the pipeline.
pub fn stage_tone(stage_number: Option<u32>) -> Tone {
    match stage_number {
        Some(n @ 1..=8) => STAGE_TONES[(n - 1) as usize],
        _ => Tone::Gray,
    }
}

pub fn stage_name_tone(stage: Option<&str>) -> Tone {
    stage
        .and_then(|s| STAGE_NAMES.iter().position(|n| *n == s))
        .map(|i| STAGE_TONES[i])
        .unwrap_or(Tone::Gray)
}

pub fn probability_tone(p: Option<u8>) -> Tone {
    match p.unwrap_or(0) {
        80.. => Tone::Green,
        60..=79 => Tone::Yellow,
        40..=59 => Tone::Orange,
        _ => Tone::Red,
    }
}

pub fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_drops_cents() {
        assert_eq!(currency(Some(1234567.89)), "$1,234,568");
        assert_eq!(currency(Some(999.4)), "$999");
        assert_eq!(currency(Some(1000.0)), "$1,000");
        assert_eq!(currency(Some(-25000.0)), "-$25,000");
    }

    #[test]
    fn currency_treats_missing_and_zero_alike() {
        assert_eq!(currency(None), "$0");
        assert_eq!(currency(Some(0.0)), "$0");
        assert_eq!(currency(Some(f64::NAN)), "$0");
    }

    #[test]
    fn short_currency_scales() {
        assert_eq!(currency_short(Some(1_250_000.0)), "$1.2M");
        assert_eq!(currency_short(Some(350_000.0)), "$350K");
        assert_eq!(currency_short(Some(900.0)), "$900");
    }

    #[test]
    fn dates_render_in_us_style() {
        assert_eq!(date(Some("2025-03-05")), "Mar 5, 2025");
        assert_eq!(date(Some("2025-03-05T23:10:00Z")), "Mar 5, 2025");
        assert_eq!(date(Some("2025-03-05T23:10:00.123456")), "Mar 5, 2025");
        assert_eq!(date(None), "N/A");
        assert_eq!(date(Some("")), "N/A");
        assert_eq!(date(Some("next quarter")), "next quarter");
    }

    #[test]
    fn datetime_uses_twelve_hour_clock() {
        assert_eq!(
            datetime(Some("2025-03-05T14:30:00Z")),
            "Mar 5, 2025, 02:30 PM"
        );
        assert_eq!(datetime(None), "N/A");
    }

    #[test]
    fn naive_timestamps_are_taken_as_utc() {
        let whole = parse_timestamp("2025-03-01T00:00:00").expect("whole seconds");
        assert_eq!(whole, parse_timestamp("2025-03-01T00:00:00Z").expect("rfc3339"));

        let frac = parse_timestamp("2025-03-01T08:15:30.250").expect("fractional");
        assert_eq!(frac.millisecond(), 250);
        assert_eq!(frac.offset(), time::UtcOffset::UTC);

        assert_eq!(
            datetime(Some("2025-03-05T14:30:00")),
            "Mar 5, 2025, 02:30 PM"
        );
        assert!(parse_timestamp("2025-03-01 08:15").is_none());
    }

    #[test]
    fn stage_tones_follow_pipeline_order() {
        assert_eq!(stage_tone(Some(1)), Tone::Gray);
        assert_eq!(stage_tone(Some(3)), Tone::Indigo);
        assert_eq!(stage_tone(Some(7)), Tone::Green);
        assert_eq!(stage_tone(Some(42)), Tone::Gray);
        assert_eq!(stage_tone(None), Tone::Gray);
        assert_eq!(stage_name_tone(Some("Closed Lost")), Tone::Red);
        assert_eq!(stage_name_tone(Some("Unknown")), Tone::Gray);
    }

    #[test]
    fn probability_tone_thresholds() {
        assert_eq!(probability_tone(Some(80)), Tone::Green);
        assert_eq!(probability_tone(Some(60)), Tone::Yellow);
        assert_eq!(probability_tone(Some(40)), Tone::Orange);
        assert_eq!(probability_tone(Some(39)), Tone::Red);
        assert_eq!(probability_tone(None), Tone::Red);
    }

    #[test]
    fn text_and_plural_helpers() {
        assert_eq!(text(Some("  Acme ")), "Acme");
        assert_eq!(text(Some(" ")), "N/A");
        assert_eq!(plural(1, "deal"), "1 deal");
        assert_eq!(plural(3, "deal"), "3 deals");
    }
}
