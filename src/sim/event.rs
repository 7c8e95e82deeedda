use super::runner::TrajectoryPoint;

// ---------------------------------------------------------------------------
// Proximity-operations events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Range dropped below a threshold.
    RangeInbound { threshold: f64 },
    /// Range rose above a threshold.
    RangeOutbound { threshold: f64 },
    /// Range rate turned from closing to opening.
    ClosestApproach { range: f64 },
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub point: TrajectoryPoint,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive trajectory points and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &TrajectoryPoint, current: &TrajectoryPoint) -> Option<EventKind>;
}

/// Detects when range crosses a threshold (e.g. entering a keep-out sphere).
/// Fires once.
pub struct RangeDetector {
    pub threshold: f64,
    pub inbound: bool,
    fired: bool,
}

impl RangeDetector {
    pub fn new(threshold: f64, inbound: bool) -> Self {
        Self { threshold, inbound, fired: false }
    }
}

impl EventDetector for RangeDetector {
    fn check(&mut self, prev: &TrajectoryPoint, current: &TrajectoryPoint) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let (r0, r1) = (prev.state.range(), current.state.range());
        let crossed = if self.inbound {
            r0 > self.threshold && r1 <= self.threshold
        } else {
            r0 < self.threshold && r1 >= self.threshold
        };
        if !crossed {
            return None;
        }
        self.fired = true;
        Some(if self.inbound {
            EventKind::RangeInbound { threshold: self.threshold }
        } else {
            EventKind::RangeOutbound { threshold: self.threshold }
        })
    }
}

/// Detects local range minima (range rate going from negative to non-negative).
pub struct ClosestApproachDetector;

impl EventDetector for ClosestApproachDetector {
    fn check(&mut self, prev: &TrajectoryPoint, current: &TrajectoryPoint) -> Option<EventKind> {
        if prev.state.range_rate() < 0.0 && current.state.range_rate() >= 0.0 {
            Some(EventKind::ClosestApproach { range: current.state.range() })
        } else {
            None
        }
    }
}

/// Run detectors over consecutive trajectory points, in time order.
pub fn scan_events(
    trajectory: &[TrajectoryPoint],
    detectors: &mut [Box<dyn EventDetector>],
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for pair in trajectory.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                log::debug!("event at t={:.2}s: {:?}", pair[1].time, kind);
                events.push(SimEvent {
                    time: pair[1].time,
                    kind,
                    point: pair[1].clone(),
                });
            }
        }
    }
    events
}
