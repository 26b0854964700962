use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::duration::parse_duration;
use crate::error::KonspektError;

/// Video metadata as supplied by the backend. Never mutated by the
/// engine; ranking is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Duration notation, either "PT#H#M#S" or "H:MM:SS"/"MM:SS".
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub has_transcript: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

/// An atomic learning unit tied to one video timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub video_title: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub timestamp_seconds: Option<u64>,
    #[serde(default)]
    pub timestamp_end_seconds: Option<u64>,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl Concept {
    /// Playback start offset in seconds, preferring the numeric field
    /// and falling back to the display timestamp string.
    pub fn start_seconds(&self) -> u64 {
        self.timestamp_seconds
            .or_else(|| parse_duration(&self.timestamp))
            .unwrap_or(0)
    }

    /// YouTube video id extracted from `video_url`, if recognizable.
    pub fn video_id(&self) -> Option<&str> {
        youtube_video_id(&self.video_url)
    }
}

/// An ordered group of concepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub module_name: String,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

/// A generated course payload. Collection fields default to empty so
/// a partial payload deserializes to "nothing to display" rather than
/// an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_title: String,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub total_videos: usize,
    #[serde(default)]
    pub total_concepts: usize,
    #[serde(default)]
    pub estimated_duration: Option<String>,
    /// Unix timestamp (seconds) of generation, set by the backend.
    #[serde(default)]
    pub generated_at: Option<f64>,
}

impl Course {
    /// Look up a concept by its positional key.
    pub fn concept(&self, key: ConceptKey) -> Option<&Concept> {
        self.modules.get(key.module)?.concepts.get(key.concept)
    }
}

/// Positional identity of a concept within one generated course
/// payload: (module index, concept index). Positions are only stable
/// for the lifetime of that payload — regenerating a course can shift
/// them, silently re-attributing any persisted completion. Stable
/// backend-assigned ids would be needed to close that gap.
///
/// Persisted as the text form `"module-concept"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptKey {
    pub module: usize,
    pub concept: usize,
}

impl ConceptKey {
    pub fn new(module: usize, concept: usize) -> Self {
        Self { module, concept }
    }
}

impl fmt::Display for ConceptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.module, self.concept)
    }
}

impl FromStr for ConceptKey {
    type Err = KonspektError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KonspektError::InvalidConceptKey { raw: s.to_string() };
        let (module, concept) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            module: module.parse().map_err(|_| invalid())?,
            concept: concept.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for ConceptKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConceptKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Extract the video id from a YouTube watch/short/embed URL.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

    let rest = MARKERS
        .iter()
        .find_map(|marker| url.find(marker).map(|at| &url[at + marker.len()..]))?;
    let end = rest
        .find(['&', '?', '#', '\n'])
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_deserializes_to_empty_collections() {
        let course: Course =
            serde_json::from_str(r#"{"course_title": "Rust Basics"}"#).unwrap();
        assert_eq!(course.course_title, "Rust Basics");
        assert!(course.videos.is_empty());
        assert!(course.modules.is_empty());
        assert_eq!(course.total_concepts, 0);
        assert!(course.generated_at.is_none());
    }

    #[test]
    fn concept_key_text_round_trip() {
        let key = ConceptKey::new(2, 7);
        assert_eq!(key.to_string(), "2-7");
        assert_eq!("2-7".parse::<ConceptKey>().unwrap(), key);
        assert!("garbage".parse::<ConceptKey>().is_err());
        assert!("1-".parse::<ConceptKey>().is_err());
    }

    #[test]
    fn concept_key_serializes_as_string() {
        let json = serde_json::to_string(&vec![ConceptKey::new(0, 1)]).unwrap();
        assert_eq!(json, r#"["0-1"]"#);
        let keys: Vec<ConceptKey> = serde_json::from_str(&json).unwrap();
        assert_eq!(keys, vec![ConceptKey::new(0, 1)]);
    }

    #[test]
    fn start_seconds_prefers_numeric_field() {
        let concept: Concept = serde_json::from_str(
            r#"{"name": "Ownership", "timestamp": "1:30", "timestamp_seconds": 95}"#,
        )
        .unwrap();
        assert_eq!(concept.start_seconds(), 95);
    }

    #[test]
    fn start_seconds_falls_back_to_timestamp_string() {
        let concept: Concept =
            serde_json::from_str(r#"{"name": "Borrowing", "timestamp": "12:34"}"#).unwrap();
        assert_eq!(concept.start_seconds(), 754);

        let blank: Concept = serde_json::from_str(r#"{"name": "Traits"}"#).unwrap();
        assert_eq!(blank.start_seconds(), 0);
    }

    #[test]
    fn youtube_id_from_common_url_shapes() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://youtu.be/dQw4w9WgXcQ?t=30"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ#start"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://example.com/video.mp4"), None);
        assert_eq!(youtube_video_id("https://youtu.be/"), None);
    }

    #[test]
    fn concept_video_id_reads_the_video_url() {
        let concept: Concept = serde_json::from_str(
            r#"{"name": "Lifetimes", "video_url": "https://www.youtube.com/watch?v=rAl-9HwD858&t=10"}"#,
        )
        .unwrap();
        assert_eq!(concept.video_id(), Some("rAl-9HwD858"));
    }
}
