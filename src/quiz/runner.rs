use rand::Rng;
use tokio::sync::mpsc;

use crate::quiz::timer::TimerSlot;
use crate::quiz::{EventSink, QuizSession};

/// Inbound calls the presentation layer can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Skip,
    Restart,
}

impl<R: Rng, S: EventSink> QuizSession<R, S> {
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Select(index) => self.select_answer(index),
            Command::Skip => self.skip(),
            Command::Restart => self.restart(),
        }
    }
}

/// Drives a session until the command channel closes.
///
/// Commands and fired timers are handled one at a time on this task, so
/// whichever of a click and an expiring countdown arrives first resolves
/// the question and the other one finds it already resolved.
pub async fn run<R: Rng, S: EventSink>(
    mut session: QuizSession<R, S>,
    mut commands: mpsc::Receiver<Command>,
) -> QuizSession<R, S> {
    let (fired_tx, mut fired_rx) = mpsc::unbounded_channel();
    let mut timers = TimerSlot::new();

    session.start();
    loop {
        timers.sync(session.pending_timer(), session.config(), &fired_tx);
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    log::debug!("Applying {:?}", command);
                    session.apply(command);
                }
                None => break,
            },
            Some(ticket) = fired_rx.recv() => session.on_timer(ticket),
        }
    }

    timers.cancel();
    log::info!("Quiz runner stopped");
    session
}
