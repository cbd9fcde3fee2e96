use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock set to a date before 1970") // If this problem occurs, enable automatic time synchronization (NTP) in the system's date and time settings.
}

/// Milliseconds since the Unix epoch, the unit used for every stored timestamp.
pub fn now_millis() -> u64 {
    now().as_millis() as u64
}
