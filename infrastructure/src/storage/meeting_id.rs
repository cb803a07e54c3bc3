//! Meeting id generation

use chrono::{DateTime, Local};
use roundtable_domain::MeetingId;

/// Id of the form `meeting_YYYYMMDD_HHMMSS`.
///
/// `taken` is consulted so two meetings created within the same second get
/// distinct ids (`..._2`, `..._3`, ...).
pub fn generate_meeting_id(now: DateTime<Local>, taken: impl Fn(&MeetingId) -> bool) -> MeetingId {
    let base = format!("meeting_{}", now.format("%Y%m%d_%H%M%S"));
    let mut id = MeetingId::new(base.clone());
    let mut n = 2;
    while taken(&id) {
        id = MeetingId::new(format!("{}_{}", base, n));
        n += 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(
            generate_meeting_id(at(), |_| false).as_str(),
            "meeting_20250307_140509"
        );
    }

    #[test]
    fn test_collision_gets_suffix() {
        let id = generate_meeting_id(at(), |id| id.as_str() == "meeting_20250307_140509");
        assert_eq!(id.as_str(), "meeting_20250307_140509_2");
    }
}
