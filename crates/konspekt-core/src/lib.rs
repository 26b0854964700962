//! Konspekt Core Library
//!
//! Learning state and playback engine for AI-generated video courses:
//! ranks videos into a suggested viewing order, tracks per-concept
//! mastery across sessions, drives bounded playback windows against
//! an injected player, and scores concept quizzes.
//!
//! The engine performs no network I/O and no rendering; the hosting
//! surface feeds it backend-generated course payloads and relays user
//! actions.

pub mod duration;
pub mod error;
pub mod mastery;
pub mod playback;
pub mod quiz;
pub mod rank;
pub mod session;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use duration::{format_seconds, parse_duration};
pub use error::{KonspektError, Result};
pub use mastery::{MasteryTracker, due_for_review, progress};
pub use playback::{
    FRAME_POLL_INTERVAL, PlaybackController, PlaybackState, PlayerError, PlayerHandle,
    PlayerState, start_bounded_playback,
};
pub use quiz::{QuestionReview, QuizAttempt, QuizResult, QuizState};
pub use rank::{RankedVideo, rank, rank_lookup};
pub use session::{LAST_COURSE_MAX_AGE, load_last_course, save_last_course};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Concept, ConceptKey, Course, Module, QuizQuestion, Video, youtube_video_id};
