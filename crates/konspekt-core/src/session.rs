//! Last-generated-course cache.
//!
//! Generating a course is slow and costs API calls, so the host saves
//! the most recent payload and restores it on the next start — but
//! only while it is fresh. Stale payloads are ignored rather than
//! deleted; the next save overwrites them.

use std::time::Duration;

use tracing::warn;

use crate::store::KeyValueStore;
use crate::types::Course;

const LAST_COURSE_KEY: &str = "lastGeneratedCourse";

/// How long a saved course stays restorable.
pub const LAST_COURSE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Persist the course as the most recently generated one.
/// Best-effort: a store failure is logged and swallowed.
pub fn save_last_course<S: KeyValueStore>(store: &S, course: &Course) {
    let raw = match serde_json::to_string(course) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "could not encode course for session cache");
            return;
        }
    };
    if let Err(e) = store.set(LAST_COURSE_KEY, &raw) {
        warn!(error = %e, "could not save last course");
    }
}

/// Restore the last generated course if it was generated within
/// `max_age` of `now` (both as Unix seconds). Courses without a
/// generation timestamp, unreadable payloads, and store failures all
/// yield `None`.
pub fn load_last_course<S: KeyValueStore>(store: &S, now: f64, max_age: Duration) -> Option<Course> {
    let raw = match store.get(LAST_COURSE_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "could not read last course");
            return None;
        }
    };
    let course: Course = match serde_json::from_str(&raw) {
        Ok(course) => course,
        Err(e) => {
            warn!(error = %e, "discarding corrupt last-course payload");
            return None;
        }
    };

    let generated_at = course.generated_at?;
    if now - generated_at > max_age.as_secs_f64() {
        return None;
    }
    Some(course)
}
