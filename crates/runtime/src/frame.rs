use foundation::time::Time;

/// Host tick metadata.
///
/// The host drives the display once per rendered frame; this carries the tick
/// number and the simulation time of the frame start.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time of this frame (seconds).
    pub dt_s: f64,
    /// Simulation time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
            dt_s: self.dt_s,
            time: self.time.advance(self.dt_s),
        }
    }
}

/// Admits at most one pass per frame index.
///
/// Frames arriving out of order (an index at or below the last admitted one)
/// are rejected as well.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameGate {
    last: Option<u64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_enter(&mut self, frame: Frame) -> bool {
        match self.last {
            Some(last) if frame.index <= last => false,
            _ => {
                self.last = Some(frame.index);
                true
            }
        }
    }

    pub fn last_admitted(&self) -> Option<u64> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameGate};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f1 = Frame::new(0, 0.5).next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
    }

    #[test]
    fn gate_admits_each_frame_once() {
        let mut gate = FrameGate::new();
        let f0 = Frame::new(0, 0.1);
        assert!(gate.try_enter(f0));
        assert!(!gate.try_enter(f0));
        assert!(gate.try_enter(f0.next()));
        assert!(!gate.try_enter(f0));
        assert_eq!(gate.last_admitted(), Some(1));
    }
}
