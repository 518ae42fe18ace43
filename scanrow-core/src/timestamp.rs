use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::{
        BorrowedFormatItem,
        well_known::{Rfc2822, Rfc3339},
    },
    macros::{datetime, format_description},
};

/// Timestamp assigned when a timestamp column holds an empty string.
pub const ZERO_TIMESTAMP: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

const CUSTOM: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour padding:none]:[minute]:[second padding:none]"
);
const CUSTOM_FRACTION: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour padding:none]:[minute]:[second padding:none].[subsecond]"
);
const CUSTOM_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour padding:none]:[minute]:[second padding:none] [offset_hour sign:mandatory][offset_minute]"
);
const CUSTOM_OFFSET_FRACTION: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour padding:none]:[minute]:[second padding:none].[subsecond] [offset_hour sign:mandatory][offset_minute]"
);
const RFC822: &[BorrowedFormatItem<'_>] =
    format_description!("[day] [month repr:short] [year] [hour]:[minute]");
const RFC1123: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second]"
);

/// Splits a trailing zone abbreviation (`MST`, `UTC`, ...) from `text`.
fn split_zone(text: &str) -> Option<&str> {
    let (rest, zone) = text.rsplit_once(' ')?;
    (zone.len() <= 5 && !zone.is_empty() && zone.bytes().all(|b| b.is_ascii_alphabetic()))
        .then_some(rest)
}

/// Two digits years map to 1969-2068.
fn expand_short_year(text: &str) -> Option<String> {
    let parts = text.split(' ').collect::<Vec<_>>();
    let [day, month, year, rest @ ..] = parts.as_slice() else {
        return None;
    };
    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let century = if *year >= "69" { "19" } else { "20" };
    Some(format!(
        "{} {} {}{} {}",
        day,
        month,
        century,
        year,
        rest.join(" ")
    ))
}

fn parse_utc(text: &str, format: &[BorrowedFormatItem<'_>]) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(text, format)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Parses `text` trying the supported formats in order:
/// 1. `2006-01-02 15:04:5`, optionally with fractional seconds
/// 2. `2006-01-02 15:04:5 -0700 MST`, optionally with fractional seconds
/// 3. RFC 3339
/// 4. RFC 822: `02 Jan 06 15:04 MST`
/// 5. RFC 1123: `Mon, 02 Jan 2006 15:04:05 MST`
/// 6. RFC 1123 with numeric zone: `Mon, 02 Jan 2006 15:04:05 -0700`
///
/// Zone abbreviations do not carry an offset, such timestamps are read as UTC.
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    parse_utc(text, CUSTOM)
        .or_else(|| parse_utc(text, CUSTOM_FRACTION))
        .or_else(|| OffsetDateTime::parse(split_zone(text)?, CUSTOM_OFFSET).ok())
        .or_else(|| OffsetDateTime::parse(split_zone(text)?, CUSTOM_OFFSET_FRACTION).ok())
        .or_else(|| OffsetDateTime::parse(text, &Rfc3339).ok())
        .or_else(|| parse_utc(&expand_short_year(split_zone(text)?)?, RFC822))
        .or_else(|| parse_utc(split_zone(text)?, RFC1123))
        .or_else(|| OffsetDateTime::parse(text, &Rfc2822).ok())
}

/// Value of a timestamp field read from `text`: the zero timestamp when empty,
/// `None` when no format matches.
pub fn decode_timestamp(text: &str) -> Option<OffsetDateTime> {
    if text.is_empty() {
        return Some(ZERO_TIMESTAMP);
    }
    parse_timestamp(text)
}
