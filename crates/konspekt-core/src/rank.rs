//! Sequencing ranker: orders a course's videos into a suggested
//! viewing sequence. Transcript availability dominates the score
//! (a transcript enables AI analysis of the content); a bounded
//! 1/duration term breaks ties in favor of shorter videos without
//! ever outweighing the transcript bonus.

use std::collections::HashMap;

use crate::duration::parse_duration;
use crate::types::Video;

const TRANSCRIPT_BONUS: f64 = 1.0;

/// A video with its derived ordering info. Recomputed whenever the
/// video set changes; never persisted.
#[derive(Debug, Clone)]
pub struct RankedVideo {
    pub video: Video,
    /// Parsed duration; `None` when the notation was unparsable.
    pub seconds: Option<u64>,
    pub score: f64,
    /// 1-based position in the recommended sequence.
    pub rank: usize,
}

/// Ranking score for one video. Unknown durations behave as
/// +infinity: the tie-break term vanishes, so they sort last within
/// their transcript group.
pub fn score(has_transcript: bool, seconds: Option<u64>) -> f64 {
    let bonus = if has_transcript { TRANSCRIPT_BONUS } else { 0.0 };
    let secs = match seconds {
        Some(s) => s.max(1) as f64,
        None => f64::INFINITY,
    };
    bonus + 1.0 / secs
}

/// Rank videos by descending score. The sort is stable: equal-score
/// videos keep their input order, so the sequence is deterministic
/// across runs.
pub fn rank(videos: &[Video]) -> Vec<RankedVideo> {
    let mut ranked: Vec<RankedVideo> = videos
        .iter()
        .map(|video| {
            let seconds = parse_duration(&video.duration);
            RankedVideo {
                video: video.clone(),
                seconds,
                score: score(video.has_transcript, seconds),
                rank: 0,
            }
        })
        .collect();

    // Scores are finite by construction (1/inf collapses to 0), so
    // total_cmp is a plain descending order here.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (idx, entry) in ranked.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
    ranked
}

/// Lookup from video id to its 1-based rank.
pub fn rank_lookup(ranked: &[RankedVideo]) -> HashMap<String, usize> {
    ranked
        .iter()
        .map(|entry| (entry.video.id.clone(), entry.rank))
        .collect()
}
