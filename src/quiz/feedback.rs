use std::f64::consts::PI;
use std::time::Duration;

use ratatui::style::Color;

use crate::quiz::session::Outcome;

const PULSE_STEPS: u32 = 40;
const PULSE_INTERVAL: Duration = Duration::from_millis(50);
const FLASH_INTERVAL: Duration = Duration::from_millis(120);

const FLASH_ON: Color = Color::Rgb(0xff, 0xd6, 0xd6);
const FLASH_OFF: Color = Color::Rgb(0xff, 0xec, 0xec);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    /// Soft green sine pulse.
    Pulse { phase: u32 },
    /// Two-tone red flash.
    Flash { on: bool },
}

/// Animated banner shown after a question is answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub outcome: Outcome,
    pattern: Pattern,
}

impl Feedback {
    pub fn new(outcome: Outcome) -> Self {
        let pattern = if outcome.is_correct() {
            Pattern::Pulse { phase: 0 }
        } else {
            Pattern::Flash { on: false }
        };
        let mut feedback = Self { outcome, pattern };
        // First frame is drawn immediately, like the first step of the loop.
        feedback.step();
        feedback
    }

    pub fn interval(&self) -> Duration {
        match self.pattern {
            Pattern::Pulse { .. } => PULSE_INTERVAL,
            Pattern::Flash { .. } => FLASH_INTERVAL,
        }
    }

    pub fn step(&mut self) {
        self.pattern = match self.pattern {
            Pattern::Pulse { phase } => Pattern::Pulse {
                phase: (phase + 1) % PULSE_STEPS,
            },
            Pattern::Flash { on } => Pattern::Flash { on: !on },
        };
    }

    pub fn background(&self) -> Color {
        match self.pattern {
            Pattern::Pulse { phase } => pulse_color(phase),
            Pattern::Flash { on } => {
                if on {
                    FLASH_ON
                } else {
                    FLASH_OFF
                }
            }
        }
    }

    pub fn foreground(&self) -> Color {
        if self.outcome.is_correct() {
            Color::Rgb(0x0a, 0x7d, 0x00)
        } else {
            Color::Rgb(0xb1, 0x0f, 0x2e)
        }
    }

    pub fn label(&self) -> &'static str {
        self.outcome.label()
    }
}

fn pulse_color(phase: u32) -> Color {
    let intensity = (1.0 + (phase as f64 / PULSE_STEPS as f64 * 2.0 * PI).sin()) / 2.0;
    let green = (200.0 + 55.0 * intensity) as u8;
    Color::Rgb(200, green, 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_pulses_green() {
        let mut fb = Feedback::new(Outcome::Correct);
        assert_eq!(fb.interval(), PULSE_INTERVAL);
        for _ in 0..PULSE_STEPS {
            match fb.background() {
                Color::Rgb(r, g, b) => {
                    assert_eq!(r, 200);
                    assert_eq!(b, 200);
                    assert!(g >= 200);
                }
                other => panic!("unexpected color {other:?}"),
            }
            fb.step();
        }
    }

    #[test]
    fn pulse_cycle_wraps() {
        assert_eq!(pulse_color(0), pulse_color(PULSE_STEPS));
        // Peak of the sine is a quarter cycle in.
        assert_eq!(pulse_color(10), Color::Rgb(200, 255, 200));
    }

    #[test]
    fn wrong_outcomes_flash() {
        for outcome in [Outcome::Incorrect, Outcome::Skipped, Outcome::TimedOut] {
            let mut fb = Feedback::new(outcome);
            assert_eq!(fb.interval(), FLASH_INTERVAL);
            let first = fb.background();
            fb.step();
            assert_ne!(first, fb.background());
            fb.step();
            assert_eq!(first, fb.background());
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Feedback::new(Outcome::TimedOut).label(), "Time's up");
        assert_eq!(Feedback::new(Outcome::Skipped).label(), "Skipped");
    }
}
