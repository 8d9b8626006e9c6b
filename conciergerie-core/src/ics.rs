//! ICS feed parsing using the icalendar crate's parser.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::parser::{Property, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::error::{ConciergeError, ConciergeResult};

/// One occupancy slot taken from a VEVENT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse ICS content into events, sorted ascending by start time.
///
/// Only VEVENT components are kept, and only those carrying a usable
/// DTSTART and DTEND; reservation feeds routinely mix in VTODO/VTIMEZONE
/// blocks and the occasional malformed entry.
pub fn parse_events(content: &str) -> ConciergeResult<Vec<CalendarEvent>> {
    let unfolded = unfold(content);
    let calendar =
        read_calendar(&unfolded).map_err(|e| ConciergeError::IcsParse(e.to_string()))?;

    let mut events: Vec<CalendarEvent> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let start = prop_to_utc(vevent.find_prop("DTSTART")?)?;
            let end = prop_to_utc(vevent.find_prop("DTEND")?)?;
            Some(CalendarEvent { start, end })
        })
        .collect();

    events.sort_by_key(|e| e.start);
    Ok(events)
}

/// Resolve a date/time property to UTC. All-day dates become midnight UTC,
/// floating times are taken as UTC, zoned times convert through their TZID.
fn prop_to_utc(prop: &Property) -> Option<DateTime<Utc>> {
    match DatePerhapsTime::try_from(prop).ok()? {
        DatePerhapsTime::Date(date) => Some(date.and_hms_opt(0, 0, 0)?.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Some(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Some(naive.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            let tz: Tz = tzid.parse().ok()?;
            tz.from_local_datetime(&date_time)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc_events_sorted_by_start() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:second\r\n\
DTSTART:20260810T100000Z\r\n\
DTEND:20260810T120000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:first\r\n\
DTSTART:20260801T100000Z\r\n\
DTEND:20260801T110000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_events(ics).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap()
        );
        assert!(events[0].start < events[1].start);
    }

    #[test]
    fn test_all_day_dates_become_midnight_utc() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:stay\r\n\
DTSTART;VALUE=DATE:20260801\r\n\
DTEND;VALUE=DATE:20260803\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_events(ics).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            events[0].end,
            Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_zoned_times_convert_to_utc() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
UID:zoned\r\n\
DTSTART;TZID=Europe/Paris:20260801T100000\r\n\
DTEND;TZID=Europe/Paris:20260801T120000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_events(ics).unwrap();
        // Paris is UTC+2 in August
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_non_vevent_components_and_incomplete_events_are_dropped() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VTODO\r\n\
UID:todo\r\n\
DTSTART:20260801T100000Z\r\n\
END:VTODO\r\n\
BEGIN:VEVENT\r\n\
UID:no-end\r\n\
DTSTART:20260801T100000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:ok\r\n\
DTSTART:20260802T100000Z\r\n\
DTEND:20260802T110000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_events(ics).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].start,
            Utc.with_ymd_and_hms(2026, 8, 2, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = parse_events("<html>not a calendar</html>").unwrap_err();
        assert!(matches!(err, ConciergeError::IcsParse(_)));
    }
}
