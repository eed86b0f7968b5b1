//! Discussion countdown: a pure per-second tick plus an async pacer that
//! drives it.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// The discussion phase, timed or explicitly untimed. A session without a
/// usable duration gets `Untimed` rather than a zeroed clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discussion {
    Timed(Countdown),
    Untimed,
}

impl Discussion {
    pub fn begin(secs: Option<u32>) -> Self {
        match secs.filter(|s| *s > 0) {
            Some(secs) => Discussion::Timed(Countdown::new(secs)),
            None => Discussion::Untimed,
        }
    }
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; `remaining` whole seconds left.
    Running { remaining: u32 },
    /// The clock ran out on this tick. Produced exactly once.
    TimesUp,
    /// The countdown already finished; nothing changes.
    Idle,
}

/// Remaining discussion time, decremented by exactly one per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    finished: bool,
}

impl Countdown {
    pub fn new(secs: u32) -> Self {
        Self { remaining: secs, finished: false }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `MM:SS` of the remaining whole seconds.
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }

    /// Advance by one elapsed second.
    pub fn tick(&mut self) -> Tick {
        if self.finished {
            return Tick::Idle;
        }
        if self.remaining == 0 {
            self.finished = true;
            tracing::debug!("discussion time is up");
            return Tick::TimesUp;
        }
        self.remaining -= 1;
        Tick::Running { remaining: self.remaining }
    }
}

/// Format whole seconds as `MM:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Event stream produced by [`pace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CountdownEvent {
    Tick { remaining: u32, display: String },
    TimesUp,
}

/// Drive a countdown once per second, forwarding each tick over `events`
/// until the terminal signal. Cancelling `cancel` tears the pacer down;
/// nothing is delivered after it fires. The caller presents the starting
/// `MM:SS` itself; the first event lands one second in.
pub async fn pace(
    mut countdown: Countdown,
    events: mpsc::UnboundedSender<CountdownEvent>,
    cancel: CancellationToken,
) {
    let mut interval = time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first interval tick completes immediately
    interval.tick().await;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("countdown cancelled");
                break;
            }
            _ = interval.tick() => match countdown.tick() {
                Tick::Running { remaining } => {
                    let event = CountdownEvent::Tick {
                        remaining,
                        display: format_clock(remaining),
                    };
                    if events.send(event).is_err() {
                        break;
                    }
                }
                Tick::TimesUp => {
                    let _ = events.send(CountdownEvent::TimesUp);
                    break;
                }
                Tick::Idle => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_zero_then_signals_once() {
        let mut countdown = Countdown::new(2);
        assert_eq!(countdown.display(), "00:02");

        assert_eq!(countdown.tick(), Tick::Running { remaining: 1 });
        assert_eq!(countdown.display(), "00:01");
        assert_eq!(countdown.tick(), Tick::Running { remaining: 0 });
        assert_eq!(countdown.display(), "00:00");
        assert_eq!(countdown.tick(), Tick::TimesUp);

        // inert from here on: no decrement, no repeat of the signal
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn missing_or_zero_duration_means_no_timer() {
        assert_eq!(Discussion::begin(None), Discussion::Untimed);
        assert_eq!(Discussion::begin(Some(0)), Discussion::Untimed);
        assert_eq!(
            Discussion::begin(Some(120)),
            Discussion::Timed(Countdown::new(120))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pacer_runs_to_times_up() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        pace(Countdown::new(2), tx, CancellationToken::new()).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                CountdownEvent::Tick { remaining: 1, display: "00:01".to_string() },
                CountdownEvent::Tick { remaining: 0, display: "00:00".to_string() },
                CountdownEvent::TimesUp,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let pacer = tokio::spawn(pace(Countdown::new(60), tx, cancel.clone()));

        time::sleep(Duration::from_millis(2500)).await;
        cancel.cancel();
        pacer.await.unwrap();

        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, CountdownEvent::Tick { .. }));
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }
}
