use glam::{DVec2, Vec2};

const FPS_REPORT_INTERVAL: f32 = 1.0;

/// Per-frame deltas handed to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    pub number: u64,
    pub time: f32,
    pub dt: f32,
    pub mouse_delta: Vec2,
}

/// Values carried from one frame to the next
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    previous_time: f64,
    previous_mouse: DVec2,
    frame_number: u64,
}

impl FrameTiming {
    /// Seed with the time and cursor position observed at startup
    pub fn new(time: f64, mouse: DVec2) -> Self {
        Self {
            previous_time: time,
            previous_mouse: mouse,
            frame_number: 0,
        }
    }

    /// Deltas between the stored values and the current ones. Does not store them.
    pub fn delta(&self, time: f64, mouse: DVec2) -> FrameDelta {
        FrameDelta {
            number: self.frame_number,
            time: time as f32,
            dt: (time - self.previous_time) as f32,
            mouse_delta: (mouse - self.previous_mouse).as_vec2(),
        }
    }

    /// Store this frame's values for the next one
    pub fn advance(&mut self, time: f64, mouse: DVec2) {
        self.previous_time = time;
        self.previous_mouse = mouse;
        self.frame_number += 1;
    }

    pub fn previous_time(&self) -> f64 {
        self.previous_time
    }

    pub fn previous_mouse(&self) -> DVec2 {
        self.previous_mouse
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

/// Frame rate averaged over roughly one second of frame time
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    frame_count: u32,
    elapsed: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns the new average whenever a report interval completes.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frame_count += 1;
        self.elapsed += dt;

        if self.elapsed < FPS_REPORT_INTERVAL {
            return None;
        }

        let fps = self.frame_count as f32 / self.elapsed;
        self.frame_count = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
