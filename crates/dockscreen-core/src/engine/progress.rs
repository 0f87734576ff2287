/// Progress events emitted while a screening invocation runs.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A pipeline stage (matching, docking, parsing, ...) has started.
    StageStart { name: &'static str },
    StageFinish,

    /// One library chunk has been scanned and joined.
    ChunkScanned { rows: u64, matched: u64 },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional caller-supplied callback.
///
/// The default reporter is silent, so library callers pay nothing unless a
/// front-end subscribes.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::StageFinish);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(format!("{:?}", event));
        }));

        reporter.report(Progress::StageStart { name: "Matching" });
        reporter.report(Progress::ChunkScanned {
            rows: 100,
            matched: 3,
        });
        reporter.report(Progress::StageFinish);
        drop(reporter);

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].contains("Matching"));
        assert!(seen[1].contains("matched: 3"));
    }
}
