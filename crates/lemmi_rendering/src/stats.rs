//! Per-frame render counters.

/// What a renderer produced for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Commands or nodes emitted.
    pub draw_calls: u32,
    /// Track objects drawn (player excluded).
    pub objects_drawn: u32,
    /// Packed GPU instances (3D only).
    pub instances: u32,
    /// Objects skipped because they were out of view.
    pub culled: u32,
}

impl RenderStats {
    /// Objects considered this frame.
    #[must_use]
    pub const fn objects_seen(&self) -> u32 {
        self.objects_drawn + self.culled
    }

    /// Adds another frame's counters into this one.
    pub fn accumulate(&mut self, frame: &RenderStats) {
        self.draw_calls = self.draw_calls.saturating_add(frame.draw_calls);
        self.objects_drawn = self.objects_drawn.saturating_add(frame.objects_drawn);
        self.instances = self.instances.saturating_add(frame.instances);
        self.culled = self.culled.saturating_add(frame.culled);
    }
}
