use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use crate::quiz::{SessionConfig, TimerKind, TimerTicket};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Holds the single timer task a session may have running.
///
/// Rescheduling always aborts the previous task first, so at most one
/// countdown or display delay is ever in flight.
#[derive(Default)]
pub struct TimerSlot {
    active: Option<(TimerTicket, JoinHandle<()>)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<TimerTicket> {
        self.active.as_ref().map(|(ticket, _)| *ticket)
    }

    /// Makes the running task match `wanted`, replacing it if needed.
    pub fn sync(
        &mut self,
        wanted: Option<TimerTicket>,
        config: &SessionConfig,
        fired: &mpsc::UnboundedSender<TimerTicket>,
    ) {
        if self.current() == wanted {
            return;
        }
        self.cancel();
        if let Some(ticket) = wanted {
            let handle = spawn_timer(ticket, config, fired.clone());
            self.active = Some((ticket, handle));
        }
    }

    pub fn cancel(&mut self) {
        if let Some((ticket, handle)) = self.active.take() {
            log::debug!("Cancelling timer {:?}", ticket);
            handle.abort();
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_timer(
    ticket: TimerTicket,
    config: &SessionConfig,
    fired: mpsc::UnboundedSender<TimerTicket>,
) -> JoinHandle<()> {
    match ticket.kind {
        TimerKind::Countdown => tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + COUNTDOWN_PERIOD, COUNTDOWN_PERIOD);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if fired.send(ticket).is_err() {
                    break;
                }
            }
        }),
        TimerKind::DisplayDelay => {
            let delay = config.display_delay;
            tokio::spawn(async move {
                sleep(delay).await;
                let _ = fired.send(ticket);
            })
        }
    }
}
