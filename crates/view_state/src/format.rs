//! Display formatting for amounts and checkin periods.
//!
//! The formatters are built once and shared read-only through
//! [`Formatters::shared`].

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const CHECKIN_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const CHECKIN_DATE_FORMAT: &str = "%Y-%m-%d";

static SHARED: OnceLock<Formatters> = OnceLock::new();

/// Parses a checkin boundary as UTC. The service sends `YYYY-MM-DD HH:MM:SS`
/// without an offset; RFC 3339 and bare dates are accepted as well.
pub fn parse_checkin_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in CHECKIN_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, CHECKIN_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    symbol: &'static str,
    group_separator: char,
}

impl CurrencyFormatter {
    pub fn usd() -> Self {
        Self {
            symbol: "$",
            group_separator: ',',
        }
    }

    /// Two fixed decimals with grouped thousands; the minus goes before the
    /// symbol. The sign always survives, so `-0.004` renders as `-$0.00`.
    pub fn format(&self, amount: f64) -> String {
        if amount.is_nan() {
            return format!("{}NaN", self.symbol);
        }
        if amount.is_infinite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{sign}{}∞", self.symbol);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let negative = amount.is_sign_negative();
        format!(
            "{}{}{}.{}",
            if negative { "-" } else { "" },
            self.symbol,
            group_thousands(whole, self.group_separator),
            fraction
        )
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Renders a checkin start as its calendar month, e.g. `March 2024`.
#[derive(Debug, Clone)]
pub struct PeriodFormatter {
    pattern: &'static str,
}

impl PeriodFormatter {
    pub fn long_month() -> Self {
        Self { pattern: "%B %Y" }
    }

    /// Falls back to the raw input when it is not a recognizable timestamp.
    pub fn format(&self, start: &str) -> String {
        match parse_checkin_start(start) {
            Some(timestamp) => timestamp.format(self.pattern).to_string(),
            None => start.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Formatters {
    pub currency: CurrencyFormatter,
    pub period: PeriodFormatter,
}

impl Formatters {
    pub fn en_us() -> Self {
        Self {
            currency: CurrencyFormatter::usd(),
            period: PeriodFormatter::long_month(),
        }
    }

    pub fn shared() -> &'static Formatters {
        SHARED.get_or_init(Self::en_us)
    }
}

pub fn format_currency(amount: f64) -> String {
    Formatters::shared().currency.format(amount)
}

pub fn format_checkin_period(start: &str) -> String {
    Formatters::shared().period.format(start)
}
