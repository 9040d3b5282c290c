//! Resource timing observer.

use super::{ResourceTimingEntry, TimingFeed};
use crate::recorder::MetricRecorder;
use shared::models::MetricSample;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Metric name for resource load samples.
pub const RESOURCE_LOAD_TIME: &str = "resource_load_time";

/// Builds the sample for one entry.
///
/// Returns `None` for non-resource entries and for entries without usable
/// `request_start`/`response_end` values.
#[must_use]
pub fn sample_for(entry: &ResourceTimingEntry, source: &str) -> Option<MetricSample> {
    if !entry.is_resource() {
        return None;
    }

    load_sample(entry, source)
}

fn load_sample(entry: &ResourceTimingEntry, source: &str) -> Option<MetricSample> {
    let value = entry.load_time()?;

    Some(
        MetricSample::new(RESOURCE_LOAD_TIME, value, "ms")
            .with_tag("type", "resource")
            .with_tag("resource_type", entry.initiator_type.as_str())
            .with_tag("name", entry.name.as_str())
            .with_source(source),
    )
}

/// Converts a batch into samples and records them.
///
/// Returns the number of samples emitted. Entries of other types are
/// ignored; malformed entries are skipped without affecting the rest of
/// the batch.
pub fn process_batch(recorder: &MetricRecorder, entries: &[ResourceTimingEntry]) -> usize {
    let mut emitted = 0;

    for entry in entries.iter().filter(|entry| entry.is_resource()) {
        let Some(sample) = load_sample(entry, recorder.source()) else {
            tracing::debug!(
                name = %entry.name,
                "Skipping timing entry without numeric timestamps"
            );
            continue;
        };

        if recorder.record(&sample) {
            emitted += 1;
        }
    }

    emitted
}

/// Subscription to a timing feed that records resource load times.
///
/// Created by [`ResourceTimingObserver::start`] and torn down by
/// [`ResourceTimingObserver::stop`] or on drop.
#[derive(Debug)]
pub struct ResourceTimingObserver {
    task: Option<JoinHandle<()>>,
}

impl ResourceTimingObserver {
    /// Subscribes to `feed` and starts recording.
    ///
    /// Returns `None` if the feed has no timing capability or if called
    /// outside a Tokio runtime. Neither case is an error.
    #[must_use]
    pub fn start(feed: &dyn TimingFeed, recorder: Arc<MetricRecorder>) -> Option<Self> {
        let Ok(runtime) = Handle::try_current() else {
            tracing::debug!("No async runtime available, resource timing observer not started");
            return None;
        };

        let Some(mut batches) = feed.subscribe(true) else {
            tracing::debug!("Timing feed unavailable, resource timing observer not started");
            return None;
        };

        let task = runtime.spawn(async move {
            while let Some(batch) = batches.recv().await {
                let emitted = process_batch(&recorder, &batch);
                tracing::trace!(entries = batch.len(), emitted, "Processed timing batch");
            }
        });

        tracing::info!("Resource timing observer started");
        Some(Self { task: Some(task) })
    }

    /// Returns `true` while the subscription is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Tears down the subscription. Calling it twice is a no-op.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("Resource timing observer stopped");
        }
    }
}

impl Drop for ResourceTimingObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{BufferedTimingFeed, UnavailableFeed};
    use shared::sink::InMemoryMetricSink;
    use std::time::Duration;
    use tracing_test::traced_test;

    fn recorder_with_sink() -> (Arc<MetricRecorder>, Arc<InMemoryMetricSink>) {
        let sink = InMemoryMetricSink::new_shared();
        let recorder = Arc::new(MetricRecorder::new(sink.clone(), "browser"));
        (recorder, sink)
    }

    async fn wait_for_samples(sink: &InMemoryMetricSink, expected: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while sink.count().unwrap() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("samples were not recorded in time");
    }

    #[test]
    fn test_sample_shape() {
        let entry = ResourceTimingEntry::resource(
            "https://cdn.example.com/app.js",
            "script",
            100.0,
            350.0,
        );

        let sample = sample_for(&entry, "browser").unwrap();

        assert_eq!(sample.name, "resource_load_time");
        assert_eq!(sample.value, 250.0);
        assert_eq!(sample.unit, "ms");
        assert_eq!(sample.source, "browser");
        assert_eq!(sample.tag("type"), Some("resource"));
        assert_eq!(sample.tag("resource_type"), Some("script"));
        assert_eq!(sample.tag("name"), Some("https://cdn.example.com/app.js"));
    }

    #[test]
    fn test_non_resource_entries_are_ignored() {
        let mut entry = ResourceTimingEntry::resource("/", "navigation", 0.0, 10.0);
        entry.entry_type = "navigation".to_string();

        assert!(sample_for(&entry, "browser").is_none());
    }

    #[test]
    fn test_process_batch_skips_malformed_entries() {
        let (recorder, sink) = recorder_with_sink();
        let mut broken = ResourceTimingEntry::resource("/broken.css", "link", 0.0, 0.0);
        broken.request_start = None;

        let emitted = process_batch(
            &recorder,
            &[
                broken,
                ResourceTimingEntry::resource("/ok.css", "link", 10.0, 30.0),
            ],
        );

        assert_eq!(emitted, 1);
        let samples = sink.samples().unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, 20.0);
    }

    #[traced_test]
    #[test]
    fn test_foreign_entries_are_not_reported_as_malformed() {
        let (recorder, sink) = recorder_with_sink();
        let mut paint = ResourceTimingEntry::resource("first-paint", "", 0.0, 0.0);
        paint.entry_type = "paint".to_string();
        paint.request_start = None;

        assert_eq!(process_batch(&recorder, &[paint]), 0);

        assert_eq!(sink.count().unwrap(), 0);
        assert!(!logs_contain("Skipping timing entry"));
    }

    #[traced_test]
    #[test]
    fn test_malformed_resource_entry_is_logged() {
        let (recorder, _sink) = recorder_with_sink();
        let mut entry = ResourceTimingEntry::resource("/broken.css", "link", 0.0, 0.0);
        entry.response_end = None;

        assert_eq!(process_batch(&recorder, &[entry]), 0);

        assert!(logs_contain("Skipping timing entry without numeric timestamps"));
    }

    #[test]
    fn test_start_outside_runtime_returns_none() {
        let (recorder, _sink) = recorder_with_sink();
        let feed = BufferedTimingFeed::new();

        assert!(ResourceTimingObserver::start(&feed, recorder).is_none());
    }

    #[tokio::test]
    async fn test_unavailable_feed_creates_no_observer() {
        let (recorder, sink) = recorder_with_sink();

        let observer = ResourceTimingObserver::start(&UnavailableFeed, recorder);

        assert!(observer.is_none());
        assert_eq!(sink.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_observer_records_live_batches() {
        let (recorder, sink) = recorder_with_sink();
        let feed = BufferedTimingFeed::new();
        let observer = ResourceTimingObserver::start(&feed, recorder).unwrap();
        assert!(observer.is_running());

        feed.push(vec![ResourceTimingEntry::resource("/app.js", "script", 100.0, 350.0)]);

        wait_for_samples(&sink, 1).await;
        assert_eq!(sink.samples().unwrap()[0].value, 250.0);
    }

    #[tokio::test]
    async fn test_observer_replays_buffered_entries() {
        let (recorder, sink) = recorder_with_sink();
        let feed = BufferedTimingFeed::new();
        feed.push(vec![ResourceTimingEntry::resource("/early.js", "script", 0.0, 42.0)]);

        let _observer = ResourceTimingObserver::start(&feed, recorder).unwrap();

        wait_for_samples(&sink, 1).await;
        assert_eq!(sink.samples().unwrap()[0].tag("name"), Some("/early.js"));
    }

    #[tokio::test]
    async fn test_stop_ends_delivery() {
        let (recorder, sink) = recorder_with_sink();
        let feed = BufferedTimingFeed::new();
        let mut observer = ResourceTimingObserver::start(&feed, recorder).unwrap();

        observer.stop();
        observer.stop();
        assert!(!observer.is_running());

        feed.push(vec![ResourceTimingEntry::resource("/late.js", "script", 0.0, 1.0)]);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(sink.count().unwrap(), 0);
    }
}
