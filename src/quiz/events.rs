use tokio::sync::mpsc;

use crate::quiz::OPTIONS_PER_QUESTION;

/// Data the session controller publishes for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QuizEvent {
    QuestionShown {
        index: usize,
        total: usize,
        text: String,
        options: [String; OPTIONS_PER_QUESTION],
        time_remaining: u32,
    },
    Tick {
        time_remaining: u32,
    },
    /// `selected` is `None` when the question timed out or was skipped.
    AnswerResolved {
        selected: Option<usize>,
        correct_index: usize,
        was_correct: bool,
        score: usize,
    },
    SessionEnded {
        score: usize,
        total: usize,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: QuizEvent);
}

impl EventSink for Vec<QuizEvent> {
    fn emit(&mut self, event: QuizEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<QuizEvent> {
    fn emit(&mut self, event: QuizEvent) {
        // The renderer going away only means nobody is watching anymore.
        if self.send(event).is_err() {
            log::debug!("Event receiver dropped, discarding event");
        }
    }
}
