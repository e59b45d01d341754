//! Serde adapters for the Gateway's JSON encoding.
//!
//! The Gateway encodes decimals as strings and dates as HTTP dates, so decoding
//! accepts several shapes. Encoding always emits plain numbers and ISO dates.

use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Date format for the Gateway and HTML date inputs, e.g. "2024-01-15".
pub(crate) const ISO_DATE: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The format of an RFC 7231 HTTP date, e.g. "Mon, 15 Jan 2024 00:00:00 GMT".
const HTTP_DATE: &[BorrowedFormatItem] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// A date and time without an offset, e.g. "2024-01-15 10:30:00".
const SPACE_SEPARATED_DATE_TIME: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// A date and time without an offset, e.g. "2024-01-15T10:30:00".
const T_SEPARATED_DATE_TIME: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Amounts that arrive either as a JSON number or as a numeric string.
pub(crate) mod amount {
    use serde::{Deserialize, Deserializer, de::Error as _};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(amount) => Ok(amount),
            NumberOrString::String(text) => text
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid amount {text:?}"))),
        }
    }
}

/// Calendar dates, written as `YYYY-MM-DD`.
pub(crate) mod date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{Date, PrimitiveDateTime};

    use super::{HTTP_DATE, ISO_DATE};

    pub(crate) fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = date.format(ISO_DATE).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        parse_date(&text).ok_or_else(|| D::Error::custom(format!("invalid date {text:?}")))
    }

    /// Parse `YYYY-MM-DD`, an ISO date-time (only the date is kept) or an HTTP date.
    pub(crate) fn parse_date(text: &str) -> Option<Date> {
        let text = text.trim();

        if let Ok(date) = Date::parse(text, ISO_DATE) {
            return Some(date);
        }

        if let Some(date) = text
            .get(..10)
            .and_then(|prefix| Date::parse(prefix, ISO_DATE).ok())
        {
            return Some(date);
        }

        PrimitiveDateTime::parse(text, HTTP_DATE)
            .ok()
            .map(|date_time| date_time.date())
    }
}

/// Optional creation timestamps. Anything unparseable is treated as missing.
pub(crate) mod timestamp {
    use serde::{Deserialize, Deserializer};
    use time::{OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339};

    use super::{HTTP_DATE, SPACE_SEPARATED_DATE_TIME, T_SEPARATED_DATE_TIME};

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;

        Ok(text.as_deref().and_then(parse_timestamp))
    }

    /// Timestamps without an offset are assumed to be UTC.
    pub(crate) fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
        let text = text.trim();

        if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
            return Some(date_time);
        }

        [SPACE_SEPARATED_DATE_TIME, T_SEPARATED_DATE_TIME, HTTP_DATE]
            .into_iter()
            .find_map(|format| PrimitiveDateTime::parse(text, format).ok())
            .map(PrimitiveDateTime::assume_utc)
    }
}

#[cfg(test)]
mod wire_tests {
    use time::macros::{date, datetime};

    use super::{date::parse_date, timestamp::parse_timestamp};

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2024-01-15"), Some(date!(2024 - 01 - 15)));
    }

    #[test]
    fn parses_http_date() {
        assert_eq!(
            parse_date("Mon, 15 Jan 2024 00:00:00 GMT"),
            Some(date!(2024 - 01 - 15))
        );
    }

    #[test]
    fn parses_date_prefix_of_date_time() {
        assert_eq!(
            parse_date("2024-01-15T00:00:00"),
            Some(date!(2024 - 01 - 15))
        );
    }

    #[test]
    fn rejects_invalid_date() {
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parses_timestamps_in_every_supported_format() {
        let want = datetime!(2024-01-15 10:30:00 UTC);

        for text in [
            "2024-01-15T10:30:00Z",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00",
            "Mon, 15 Jan 2024 10:30:00 GMT",
        ] {
            assert_eq!(parse_timestamp(text), Some(want), "could not parse {text:?}");
        }
    }

    #[test]
    fn unparseable_timestamp_is_none() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
