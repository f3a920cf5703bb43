//! Observers of applied events.
//!
//! The driver hands every applied event to an [`EventSink`] together with
//! the lattice it produced. Sinks only observe; nothing they do feeds back
//! into the trajectory.

use std::io::{self, Write};

use latsim_lattice::LatticeState;

use crate::driver::Phase;
use crate::transitions::ActiveTransition;

/// One applied event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventRecord {
    /// Phase the event was applied in.
    pub phase: Phase,
    /// Absolute simulated time of the event, warm-up included.
    pub time: f64,
    /// Waiting time since the previous event.
    pub dt: f64,
    /// The applied transition.
    pub transition: ActiveTransition,
}

/// Receiver of applied events.
pub trait EventSink {
    /// Called once with the initial lattice before the first event.
    fn start(&mut self, _lattice: &LatticeState) {}

    /// Called after `event` has been applied; `lattice` is the result.
    fn record(&mut self, event: &EventRecord, lattice: &LatticeState);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn start(&mut self, lattice: &LatticeState) {
        (**self).start(lattice);
    }

    fn record(&mut self, event: &EventRecord, lattice: &LatticeState) {
        (**self).record(event, lattice);
    }
}

// ── NullSink ───────────────────────────────────────────────────────

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &EventRecord, _lattice: &LatticeState) {}
}

// ── TraceWriter ────────────────────────────────────────────────────

/// Writes one `"<sites> : <time>"` line per event.
///
/// The initial lattice is written at time `0`. The first write error is
/// kept and stops further output; [`finish()`](Self::finish) returns it.
///
/// ```
/// use latsim_engine::{EventSink, TraceWriter};
/// use latsim_lattice::LatticeState;
///
/// let mut trace = TraceWriter::new(Vec::new());
/// trace.start(&LatticeState::new(3, 2, &[1]).unwrap());
/// let out = trace.finish().unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "100 : 0\n");
/// ```
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceWriter<W> {
    /// Trace into `out`.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn line(&mut self, lattice: &LatticeState, time: f64) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{lattice} : {time}") {
            self.error = Some(e);
        }
    }

    /// Flush and return the writer, or the first error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> EventSink for TraceWriter<W> {
    fn start(&mut self, lattice: &LatticeState) {
        self.line(lattice, 0.0);
    }

    fn record(&mut self, event: &EventRecord, lattice: &LatticeState) {
        self.line(lattice, event.time);
    }
}

// ── RecordingSink ──────────────────────────────────────────────────

/// Keeps every event and the lattice rendering after it, for tests and
/// replay comparisons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    /// Initial lattice rendering, if the run started.
    pub initial: Option<String>,
    /// Applied events in order.
    pub events: Vec<EventRecord>,
    /// Lattice rendering after each event.
    pub states: Vec<String>,
}

impl RecordingSink {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events applied in `phase`.
    pub fn phase_events(&self, phase: Phase) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().filter(move |e| e.phase == phase)
    }
}

impl EventSink for RecordingSink {
    fn start(&mut self, lattice: &LatticeState) {
        self.initial = Some(lattice.to_string());
    }

    fn record(&mut self, event: &EventRecord, lattice: &LatticeState) {
        self.events.push(*event);
        self.states.push(lattice.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(time: f64) -> EventRecord {
        EventRecord {
            phase: Phase::Measure,
            time,
            dt: 0.5,
            transition: ActiveTransition {
                rate: 1.0,
                target: 1,
                position: 0,
                window: 1,
                rule: 0,
                source: 0,
            },
        }
    }

    #[derive(Debug)]
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn trace_lines_use_absolute_time() {
        let mut trace = TraceWriter::new(Vec::new());
        let lattice = LatticeState::new(4, 2, &[0, 1]).unwrap();
        trace.start(&lattice);
        trace.record(&event(1.5), &lattice);
        trace.record(&event(2.25), &lattice);
        let out = String::from_utf8(trace.finish().unwrap()).unwrap();
        assert_eq!(out, "0100 : 0\n0100 : 1.5\n0100 : 2.25\n");
    }

    #[test]
    fn trace_keeps_first_error() {
        let mut trace = TraceWriter::new(FailingWriter);
        let lattice = LatticeState::new(2, 2, &[]).unwrap();
        trace.start(&lattice);
        trace.record(&event(1.0), &lattice);
        let err = trace.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn recording_sink_keeps_states() {
        let mut sink = RecordingSink::new();
        let a = LatticeState::new(2, 2, &[]).unwrap();
        let b = LatticeState::new(2, 2, &[1]).unwrap();
        sink.start(&a);
        sink.record(&event(0.5), &b);
        assert_eq!(sink.initial.as_deref(), Some("00"));
        assert_eq!(sink.states, vec!["10".to_string()]);
        assert_eq!(sink.phase_events(Phase::Measure).count(), 1);
        assert_eq!(sink.phase_events(Phase::WarmUp).count(), 0);
    }

    #[test]
    fn sink_by_reference() {
        fn feed<S: EventSink>(mut sink: S) {
            sink.start(&LatticeState::new(1, 2, &[]).unwrap());
            sink.record(&event(0.1), &LatticeState::new(1, 2, &[1]).unwrap());
        }
        let mut sink = RecordingSink::new();
        feed(&mut sink);
        assert_eq!(sink.initial.as_deref(), Some("0"));
        assert_eq!(sink.states, vec!["1".to_string()]);
    }
}
