//! # Version Generation
//!
//! Userstyle versions are derived from the wall clock rather than tracked as
//! semantic versions. A build at 2024-03-07 09:05 local time produces
//! `20240307.09.05`: the date, the hour and the minute as three dot-separated
//! groups, every component zero-padded to a fixed width.
//!
//! Because every component has a fixed width, versions sort the same way
//! lexicographically and chronologically. Two builds within the same minute
//! produce the same version; callers can use [`is_collision`] to notice it.

use chrono::{Datelike, Local, Timelike};

/// Formats a version string from a point in time.
///
/// Pure function of its input; see [`current_version`] for the clock-reading
/// variant used by the pipeline.
pub fn generate_version<T: Datelike + Timelike>(now: &T) -> String {
    format!(
        "{:04}{:02}{:02}.{:02}.{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute()
    )
}

/// Generates the version for the current local time.
pub fn current_version() -> String {
    generate_version(&Local::now())
}

/// Returns true when a freshly generated version is identical to the one it
/// replaces, which happens for two builds inside the same clock minute.
pub fn is_collision(previous: Option<&str>, next: &str) -> bool {
    previous == Some(next)
}
