/// Counters for events handled by the view engine.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: Metrics,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub zoom_changes: usize,
    pub filter_changes: usize,
    pub reclusters: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_zoom_change(&mut self) {
        self.inner.zoom_changes += 1;
    }

    pub fn record_filter_change(&mut self) {
        self.inner.filter_changes += 1;
    }

    pub fn record_recluster(&mut self) {
        self.inner.reclusters += 1;
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_counts_each_event_kind() {
        let mut recorder = MetricsRecorder::new();
        recorder.record_zoom_change();
        recorder.record_recluster();
        recorder.record_recluster();
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.zoom_changes, 1);
        assert_eq!(snapshot.filter_changes, 0);
        assert_eq!(snapshot.reclusters, 2);
    }
}
