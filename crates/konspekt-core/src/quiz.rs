//! Quiz state machine: steps a learner through an ordered list of
//! single-answer multiple-choice questions, records one answer per
//! question, and scores the attempt at the end.
//!
//! An attempt is ephemeral per-session state; it is dropped, not
//! persisted, when the quiz closes.

use std::collections::HashMap;

use crate::types::QuizQuestion;

#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    InProgress { index: usize },
    Scored(QuizResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub questions: Vec<QuestionReview>,
}

/// Per-question outcome for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionReview {
    pub question: String,
    /// Text of the learner's chosen option, if any was recorded.
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    current: usize,
    selections: HashMap<usize, usize>,
    scored: bool,
}

impl QuizAttempt {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            selections: HashMap::new(),
            scored: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at the current index, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    /// Whether the current question has a recorded selection. Hosts
    /// use this to gate `advance`; the machine itself accepts skipped
    /// questions and scores them as incorrect.
    pub fn is_answered(&self) -> bool {
        self.selections.contains_key(&self.current)
    }

    /// Record or overwrite the choice for a question. Ignored once
    /// the attempt is scored or for an out-of-range index. Does not
    /// advance.
    pub fn select_answer(&mut self, question: usize, option: usize) {
        if self.scored || question >= self.questions.len() {
            return;
        }
        self.selections.insert(question, option);
    }

    /// Move to the next question, or score the attempt when already
    /// at the last one.
    pub fn advance(&mut self) -> QuizState {
        if !self.scored {
            if self.current + 1 < self.questions.len() {
                self.current += 1;
            } else {
                self.scored = true;
            }
        }
        self.current_state()
    }

    /// Drop all selections and return to the first question.
    pub fn restart(&mut self) {
        self.current = 0;
        self.selections.clear();
        self.scored = false;
    }

    pub fn current_state(&self) -> QuizState {
        if self.scored {
            QuizState::Scored(self.result())
        } else {
            QuizState::InProgress {
                index: self.current,
            }
        }
    }

    fn result(&self) -> QuizResult {
        let mut score = 0;
        let mut questions = Vec::with_capacity(self.questions.len());

        for (idx, q) in self.questions.iter().enumerate() {
            let chosen_idx = self.selections.get(&idx).copied();
            let is_correct = chosen_idx == Some(q.correct);
            if is_correct {
                score += 1;
            }
            questions.push(QuestionReview {
                question: q.question.clone(),
                chosen: chosen_idx.and_then(|c| q.options.get(c).cloned()),
                correct_answer: q.options.get(q.correct).cloned().unwrap_or_default(),
                is_correct,
                explanation: q.explanation.clone(),
            });
        }

        let total = self.questions.len();
        let percentage = if total == 0 {
            0.0
        } else {
            score as f64 / total as f64 * 100.0
        };
        QuizResult {
            score,
            total,
            percentage,
            questions,
        }
    }
}
