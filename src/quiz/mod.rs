pub mod bank;
pub mod events;
pub mod runner;
pub mod session;
pub mod timer;

use std::time::Duration;

pub use bank::{BankError, QuestionBank};
pub use events::{EventSink, QuizEvent};
pub use runner::Command;
pub use session::{Phase, QuizSession, SessionConfig, SessionState, TimerKind, TimerTicket};

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const COUNTDOWN_SECS: u32 = 10;
pub const DISPLAY_DELAY: Duration = Duration::from_millis(1200);

/// Position of an option within a question, `A` being index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; OPTIONS_PER_QUESTION] =
        [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct: OptionLabel,
}

impl Question {
    pub fn new(text: String, options: [String; OPTIONS_PER_QUESTION], correct: OptionLabel) -> Self {
        Self {
            text,
            options,
            correct,
        }
    }

    pub fn correct_index(&self) -> usize {
        self.correct.index()
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index()]
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index()
    }
}
