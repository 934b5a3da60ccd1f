//! Event domain model and display formatting.
//!
//! An [`Event`] is owned by the catalog and never mutated by this crate. Dates and
//! times are kept as the strings the catalog supplies (`YYYY-MM-DD` and `HH:MM`);
//! the formatting helpers turn them into user-facing labels and fall back to the raw
//! value when it does not parse.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire format of [`Event::date`].
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of [`Event::time`].
const TIME_FORMAT: &str = "%H:%M";

/// A browsable event.
///
/// `id` uniquely identifies an event within one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub location: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Event {
    /// Short date label used on list cards, e.g. `Sun, Dec 15`.
    ///
    /// # Examples
    ///
    /// ```
    /// use event_explorer::domain::Event;
    ///
    /// let event = Event {
    ///     id: "1".into(),
    ///     title: "Jazz Night".into(),
    ///     date: "2024-12-15".into(),
    ///     time: "20:00".into(),
    ///     description: String::new(),
    ///     location: "Blue Note".into(),
    ///     category: "Music".into(),
    ///     image_url: None,
    /// };
    /// assert_eq!(event.short_date(), "Sun, Dec 15");
    /// assert_eq!(event.long_date(), "Sunday, December 15, 2024");
    /// assert_eq!(event.display_time(), "8:00 PM");
    /// ```
    #[must_use]
    pub fn short_date(&self) -> String {
        self.parsed_date()
            .map_or_else(|| self.date.clone(), |d| d.format("%a, %b %-d").to_string())
    }

    /// Long date label used on the details screen, e.g. `Sunday, December 15, 2024`.
    #[must_use]
    pub fn long_date(&self) -> String {
        self.parsed_date()
            .map_or_else(|| self.date.clone(), |d| d.format("%A, %B %-d, %Y").to_string())
    }

    /// 12-hour clock label, e.g. `9:00 AM`; midnight renders as `12:00 AM`.
    #[must_use]
    pub fn display_time(&self) -> String {
        NaiveTime::parse_from_str(&self.time, TIME_FORMAT)
            .map_or_else(|_| self.time.clone(), |t| t.format("%-I:%M %p").to_string())
    }

    fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, time: &str) -> Event {
        Event {
            id: "x".into(),
            title: "t".into(),
            date: date.into(),
            time: time.into(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn formats_twelve_hour_times() {
        assert_eq!(event("2024-12-15", "09:00").display_time(), "9:00 AM");
        assert_eq!(event("2024-12-15", "12:30").display_time(), "12:30 PM");
        assert_eq!(event("2024-12-15", "00:00").display_time(), "12:00 AM");
        assert_eq!(event("2024-12-15", "21:00").display_time(), "9:00 PM");
    }

    #[test]
    fn unparseable_values_are_shown_verbatim() {
        let e = event("sometime soon", "late");
        assert_eq!(e.short_date(), "sometime soon");
        assert_eq!(e.long_date(), "sometime soon");
        assert_eq!(e.display_time(), "late");
    }

    #[test]
    fn image_url_uses_camel_case_on_the_wire() {
        let json = r#"{"id":"1","title":"a","date":"2024-12-31","time":"21:00",
            "description":"d","location":"l","category":"c","imageUrl":"http://x"}"#;
        let e: Event = serde_json::from_str(json).expect("valid event");
        assert_eq!(e.image_url.as_deref(), Some("http://x"));
        assert_eq!(e.long_date(), "Tuesday, December 31, 2024");
    }
}
