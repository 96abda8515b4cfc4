//! The quiz session controller.
//!
//! Owns the shuffled question order, the score and the countdown for the
//! live question. Every inbound call either changes state and emits events
//! through the [`EventSink`], or is silently ignored when it does not apply
//! to the current phase.
//!
//! The controller never waits on anything. It publishes the timer it wants
//! as a [`TimerTicket`]; whoever schedules timers hands the ticket back via
//! [`QuizSession::on_timer`] once it fires. Tickets carry an epoch that
//! moves on every transition, so a timer scheduled for an earlier question
//! or an earlier session is recognised as stale and dropped.

use std::time::Duration;

use rand::Rng;

use crate::quiz::{
    EventSink, OptionLabel, Question, QuestionBank, QuizEvent, COUNTDOWN_SECS, DISPLAY_DELAY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub countdown_secs: u32,
    pub display_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_secs: COUNTDOWN_SECS,
            display_delay: DISPLAY_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    QuestionLive,
    Resolved,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Fires once per countdown second while a question is live.
    Countdown,
    /// Fires once after a resolution to move on.
    DisplayDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket {
    pub epoch: u64,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub ordered_questions: Vec<Question>,
    pub current_index: usize,
    pub score: usize,
    pub time_remaining: u32,
    pub answered: bool,
}

impl SessionState {
    pub fn total(&self) -> usize {
        self.ordered_questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.ordered_questions.get(self.current_index)
    }
}

pub struct QuizSession<R, S> {
    bank: QuestionBank,
    config: SessionConfig,
    rng: R,
    sink: S,
    state: Option<SessionState>,
    phase: Phase,
    epoch: u64,
}

impl<R: Rng, S: EventSink> QuizSession<R, S> {
    pub fn new(bank: QuestionBank, config: SessionConfig, rng: R, sink: S) -> Self {
        Self {
            bank,
            config,
            rng,
            sink,
            state: None,
            phase: Phase::NotStarted,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The timer that should currently be scheduled, if any.
    pub fn pending_timer(&self) -> Option<TimerTicket> {
        let kind = match self.phase {
            Phase::QuestionLive => TimerKind::Countdown,
            Phase::Resolved => TimerKind::DisplayDelay,
            Phase::NotStarted | Phase::Finished => return None,
        };
        Some(TimerTicket {
            epoch: self.epoch,
            kind,
        })
    }

    pub fn start(&mut self) {
        let ordered_questions = self.bank.shuffled(&mut self.rng);
        log::info!("Starting quiz with {} questions", ordered_questions.len());
        self.state = Some(SessionState {
            ordered_questions,
            current_index: 0,
            score: 0,
            time_remaining: self.config.countdown_secs,
            answered: false,
        });
        self.show_current();
    }

    /// Starts over with a fresh shuffle. Any pending countdown or display
    /// delay belongs to the previous epoch and will be ignored.
    pub fn restart(&mut self) {
        log::info!("Restarting quiz from {:?}", self.phase);
        self.start();
    }

    pub fn tick(&mut self) {
        if self.phase != Phase::QuestionLive {
            log::debug!("Ignoring tick while {:?}", self.phase);
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.time_remaining = state.time_remaining.saturating_sub(1);
        let time_remaining = state.time_remaining;
        self.sink.emit(QuizEvent::Tick { time_remaining });
        if time_remaining == 0 {
            log::debug!("Time expired on question {}", state.current_index + 1);
            self.resolve(None);
        }
    }

    pub fn select_answer(&mut self, index: usize) {
        if self.phase != Phase::QuestionLive {
            log::debug!("Ignoring selection {} while {:?}", index, self.phase);
            return;
        }
        let Some(label) = OptionLabel::from_index(index) else {
            log::debug!("Ignoring out of range selection {}", index);
            return;
        };
        self.resolve(Some(label));
    }

    pub fn skip(&mut self) {
        if self.phase != Phase::QuestionLive {
            log::debug!("Ignoring skip while {:?}", self.phase);
            return;
        }
        self.resolve(None);
    }

    /// Moves past a resolved question, either to the next one or to the end
    /// of the session.
    pub fn advance(&mut self) {
        if self.phase != Phase::Resolved {
            log::debug!("Ignoring advance while {:?}", self.phase);
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.current_index += 1;
        if state.current_index < state.total() {
            state.time_remaining = self.config.countdown_secs;
            state.answered = false;
            self.show_current();
        } else {
            let (score, total) = (state.score, state.total());
            log::info!("Quiz finished with score {}/{}", score, total);
            self.transition(Phase::Finished);
            self.sink.emit(QuizEvent::SessionEnded { score, total });
        }
    }

    /// Applies a fired timer if it is still the one this session asked for.
    pub fn on_timer(&mut self, ticket: TimerTicket) {
        if self.pending_timer() != Some(ticket) {
            log::debug!("Discarding stale timer {:?}", ticket);
            return;
        }
        match ticket.kind {
            TimerKind::Countdown => self.tick(),
            TimerKind::DisplayDelay => self.advance(),
        }
    }

    fn show_current(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let Some(question) = state.current_question() else {
            return;
        };
        let event = QuizEvent::QuestionShown {
            index: state.current_index,
            total: state.total(),
            text: question.text.clone(),
            options: question.options.clone(),
            time_remaining: state.time_remaining,
        };
        self.transition(Phase::QuestionLive);
        self.sink.emit(event);
    }

    fn resolve(&mut self, selected: Option<OptionLabel>) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let Some(question) = state.ordered_questions.get(state.current_index) else {
            return;
        };
        let correct_index = question.correct_index();
        let was_correct = selected == Some(question.correct);
        state.answered = true;
        if was_correct {
            state.score += 1;
        }
        let score = state.score;
        log::debug!(
            "Question {} resolved: selected {:?}, correct {}",
            state.current_index + 1,
            selected,
            was_correct
        );
        self.transition(Phase::Resolved);
        self.sink.emit(QuizEvent::AnswerResolved {
            selected: selected.map(OptionLabel::index),
            correct_index,
            was_correct,
            score,
        });
    }

    fn transition(&mut self, phase: Phase) {
        self.phase = phase;
        self.epoch += 1;
    }
}
