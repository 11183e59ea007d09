use crate::error::QuizError;
use crate::quiz::question::{OPTION_COUNT, Question, validate_all};

pub const DEFAULT_TIME_PER_QUESTION: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped,
    TimedOut,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Correct => "Correct",
            Outcome::Incorrect => "Wrong",
            Outcome::Skipped => "Skipped",
            Outcome::TimedOut => "Time's up",
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Answered(Outcome),
    Finished,
}

/// What a single `tick()` did to the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// Not in `Idle`; nothing changed.
    Ignored,
    Running(u32),
    TimedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
}

impl QuizSummary {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

/// Question/timer/answer state machine for one quiz run.
///
/// The session counts seconds but owns no clock. The driver calls `tick()`
/// once per elapsed second while `is_idle()` holds.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    time_per_question: u32,
    time_left: u32,
    selected_option: Option<usize>,
    phase: Phase,
    outcomes: Vec<Outcome>,
}

impl QuizSession {
    /// Starts the session with the first question loaded.
    pub fn new(questions: Vec<Question>, time_per_question: u32) -> Result<Self, QuizError> {
        validate_all(&questions)?;
        let time_per_question = time_per_question.max(1);
        let mut session = Self {
            questions,
            current_index: 0,
            score: 0,
            time_per_question,
            time_left: time_per_question,
            selected_option: None,
            phase: Phase::Idle,
            outcomes: Vec::new(),
        };
        session.load(0);
        Ok(session)
    }

    fn load(&mut self, index: usize) {
        self.current_index = index;
        self.selected_option = None;
        self.time_left = self.time_per_question;
        self.phase = Phase::Idle;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered(_))
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_per_question(&self) -> u32 {
        self.time_per_question
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Running score as a fraction of all questions, for the progress bar.
    pub fn score_ratio(&self) -> f64 {
        self.score as f64 / self.questions.len() as f64
    }

    pub fn select(&mut self, option: usize) {
        if self.is_idle() && option < OPTION_COUNT {
            self.selected_option = Some(option);
        }
    }

    pub fn select_next(&mut self) {
        let next = match self.selected_option {
            Some(i) => (i + 1) % OPTION_COUNT,
            None => 0,
        };
        self.select(next);
    }

    pub fn select_prev(&mut self) {
        let prev = match self.selected_option {
            Some(i) => (i + OPTION_COUNT - 1) % OPTION_COUNT,
            None => OPTION_COUNT - 1,
        };
        self.select(prev);
    }

    pub fn tick(&mut self) -> TickResult {
        if !self.is_idle() {
            return TickResult::Ignored;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.record(Outcome::TimedOut);
            TickResult::TimedOut
        } else {
            TickResult::Running(self.time_left)
        }
    }

    /// Records the selected answer. Returns `Ok(None)` when the question was
    /// already answered.
    pub fn submit(&mut self) -> Result<Option<Outcome>, QuizError> {
        if !self.is_idle() {
            return Ok(None);
        }
        let choice = self.selected_option.ok_or(QuizError::NoSelection)?;
        let correct = self.questions[self.current_index].is_correct(choice);
        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.record(outcome);
        Ok(Some(outcome))
    }

    pub fn skip(&mut self) -> Option<Outcome> {
        if !self.is_idle() {
            return None;
        }
        self.record(Outcome::Skipped);
        Some(Outcome::Skipped)
    }

    fn record(&mut self, outcome: Outcome) {
        if outcome.is_correct() {
            self.score += 1;
        }
        self.outcomes.push(outcome);
        self.phase = Phase::Answered(outcome);
    }

    /// Moves on from an answered question. Returns the new phase, or `None`
    /// when called outside `Answered`.
    pub fn advance(&mut self) -> Option<Phase> {
        if !self.is_answered() {
            return None;
        }
        if self.current_index + 1 < self.questions.len() {
            self.load(self.current_index + 1);
        } else {
            self.current_index = self.questions.len();
            self.phase = Phase::Finished;
        }
        Some(self.phase)
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score,
            total: self.questions.len(),
        }
    }
}
