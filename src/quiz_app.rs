use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use crate::explorer::dialogs::NoticeLevel;
use crate::quiz::feedback::Feedback;
use crate::quiz::session::{Outcome, Phase, QuizSession, TickResult};
use crate::timer::OneShot;
use crate::ui::components::modal::Notice;
use crate::ui::theme::Theme;

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Front end of the quiz: routes keys and timer fires into the session.
///
/// Owns both timers. The countdown is armed only while the session is
/// `Idle`; the feedback animation only while a question is `Answered`.
pub struct QuizApp {
    pub session: QuizSession,
    pub theme: &'static Theme,
    pub feedback: Option<Feedback>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    countdown: OneShot,
    animation: OneShot,
}

impl QuizApp {
    pub fn new(session: QuizSession, theme: &'static Theme, now: Instant) -> Self {
        let mut app = Self {
            session,
            theme,
            feedback: None,
            notice: None,
            should_quit: false,
            countdown: OneShot::new(COUNTDOWN_STEP),
            animation: OneShot::new(Duration::from_millis(50)),
        };
        app.countdown.arm(now);
        tracing::info!(questions = app.session.total(), "quiz started");
        app
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn animation_armed(&self) -> bool {
        self.animation.is_armed()
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.countdown.poll(now) {
            match self.session.tick() {
                TickResult::Running(_) => self.countdown.arm(now),
                TickResult::TimedOut => self.enter_answered(Outcome::TimedOut, now),
                TickResult::Ignored => {}
            }
        }
        if self.animation.poll(now) {
            if let Some(feedback) = self.feedback.as_mut() {
                feedback.step();
                self.animation.arm(now);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return;
        }

        if self.session.is_finished() {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char(ch @ '1'..='4') => {
                self.session.select(ch as usize - '1' as usize);
            }
            KeyCode::Down | KeyCode::Char('j') => self.session.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.session.select_prev(),
            KeyCode::Enter => {
                if self.session.is_answered() {
                    self.advance(now);
                } else {
                    self.submit(now);
                }
            }
            KeyCode::Char('n') | KeyCode::Right => self.advance(now),
            KeyCode::Esc | KeyCode::Char('s') => self.skip(now),
            _ => {}
        }
    }

    pub fn submit(&mut self, now: Instant) {
        match self.session.submit() {
            Ok(Some(outcome)) => self.enter_answered(outcome, now),
            Ok(None) => {}
            Err(e) => {
                self.notice = Some(Notice::new(NoticeLevel::Warning, "Validation", &e.to_string()));
            }
        }
    }

    pub fn skip(&mut self, now: Instant) {
        if let Some(outcome) = self.session.skip() {
            self.enter_answered(outcome, now);
        }
    }

    pub fn advance(&mut self, now: Instant) {
        match self.session.advance() {
            Some(Phase::Idle) => {
                self.stop_feedback();
                self.countdown.arm(now);
            }
            Some(Phase::Finished) => {
                self.stop_feedback();
                self.countdown.disarm();
                let summary = self.session.summary();
                tracing::info!(
                    score = summary.score,
                    total = summary.total,
                    percent = summary.percent(),
                    "quiz finished"
                );
            }
            _ => {}
        }
    }

    fn enter_answered(&mut self, outcome: Outcome, now: Instant) {
        self.countdown.disarm();
        let feedback = Feedback::new(outcome);
        self.animation.set_delay(feedback.interval());
        self.animation.arm(now);
        self.feedback = Some(feedback);
        tracing::debug!(
            question = self.session.current_index() + 1,
            ?outcome,
            score = self.session.score(),
            "question answered"
        );
    }

    fn stop_feedback(&mut self) {
        self.animation.disarm();
        self.feedback = None;
    }

    /// Cancels every pending timer. Called before the terminal is torn down.
    pub fn shutdown(&mut self) {
        self.countdown.disarm();
        self.stop_feedback();
    }

    pub fn quit(&mut self) {
        self.shutdown();
        self.should_quit = true;
    }
}
