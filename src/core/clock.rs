//! Clock text formatting for the taskbar tray.
//!
//! The tray shows `h:mm` (12-hour, no AM/PM suffix) over `m/d`, like the
//! Win98 system clock. Clicking the clock raises a full date/time
//! disclosure with the long weekday/month forms.

use chrono::{Datelike, Timelike};

/// 12-hour `h:mm` with the AM/PM suffix stripped: 14:05 -> "2:05".
pub fn short_time<T: Timelike>(t: &T) -> String {
    let (_, hour) = t.hour12();
    format!("{}:{:02}", hour, t.minute())
}

/// `m/d` with no zero padding: July 4th -> "7/4".
pub fn short_date<D: Datelike>(d: &D) -> String {
    format!("{}/{}", d.month(), d.day())
}

/// Two-line long-form disclosure shown when the clock is clicked,
/// e.g. "Saturday, July 4, 2026\n2:05:09 PM".
pub fn full_disclosure<T: Datelike + Timelike>(dt: &T) -> String {
    let (is_pm, hour) = dt.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!(
        "{}, {} {}, {}\n{}:{:02}:{:02} {}",
        weekday_name(dt.weekday()),
        month_name(dt.month()),
        dt.day(),
        dt.year(),
        hour,
        dt.minute(),
        dt.second(),
        meridiem,
    )
}

fn weekday_name(w: chrono::Weekday) -> &'static str {
    match w {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
