use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::core::{BatchSummary, DrawableOutput, SourceFile, TranscodeJob};
use crate::processing::{BatchProcessor, Rasterizer, Transcoder};
use crate::utils::{TranscodeResult, ensure_dir};

const DEFAULT_WORKERS: usize = 4;

/// Runs independent transcode jobs on tokio's blocking pool.
///
/// Jobs writing the same destination are chained inside one worker. After the
/// first failure no further work is submitted; work already running drains
/// and the first error is returned.
pub struct WorkerPool<R> {
    processor: Arc<BatchProcessor<R>>,
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

impl<R> WorkerPool<R>
where
    R: Rasterizer + Send + Sync + 'static,
{
    pub fn new(processor: BatchProcessor<R>, worker_count: Option<usize>) -> Self {
        let worker_count = worker_count.unwrap_or(DEFAULT_WORKERS).max(1);
        Self {
            processor: Arc::new(processor),
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn processor(&self) -> &BatchProcessor<R> {
        &self.processor
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    pub async fn process<I>(&self, sources: I) -> TranscodeResult<BatchSummary>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        ensure_dir(self.processor.output_dir())?;

        let sources: Vec<SourceFile> = sources.into_iter().collect();
        let groups = group_by_destination(sources.iter().flat_map(|s| self.processor.plan(s)));

        let dirs: BTreeSet<PathBuf> = groups
            .iter()
            .filter_map(|g| g[0].destination.parent().map(PathBuf::from))
            .collect();
        for dir in &dirs {
            ensure_dir(dir)?;
        }

        info!(
            "Processing {} sources as {} jobs on {} workers",
            sources.len(),
            groups.len(),
            self.worker_count
        );

        let failed = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(groups.len());

        for group in groups {
            let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
            if failed.load(Ordering::SeqCst) {
                debug!("Earlier job failed; not submitting remaining jobs");
                break;
            }

            let processor = Arc::clone(&self.processor);
            let active = Arc::clone(&self.active_workers);
            let failed = Arc::clone(&failed);

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let current = active.fetch_add(1, Ordering::SeqCst) + 1;
                debug!("Worker started - Active: {}", current);

                let result = run_group(processor.transcoder(), &group, &failed);
                if result.is_err() {
                    failed.store(true, Ordering::SeqCst);
                }

                active.fetch_sub(1, Ordering::SeqCst);
                result
            }));
        }

        let mut outputs = Vec::new();
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(written)) => outputs.extend(written),
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(e.into());
                }
            }
        }

        if let Some(e) = first_error {
            warn!("Batch aborted: {}", e);
            return Err(e);
        }

        info!(
            "Transcoded {} sources into {} drawables",
            sources.len(),
            outputs.len()
        );
        Ok(BatchSummary {
            sources: sources.len(),
            outputs,
        })
    }
}

/// Groups jobs sharing a destination, keeping first-seen order.
fn group_by_destination(jobs: impl IntoIterator<Item = TranscodeJob>) -> Vec<Vec<TranscodeJob>> {
    let mut groups: Vec<Vec<TranscodeJob>> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();
    for job in jobs {
        match index.get(&job.destination) {
            Some(&i) => groups[i].push(job),
            None => {
                index.insert(job.destination.clone(), groups.len());
                groups.push(vec![job]);
            }
        }
    }
    groups
}

fn run_group<R: Rasterizer>(
    transcoder: &Transcoder<R>,
    group: &[TranscodeJob],
    failed: &AtomicBool,
) -> TranscodeResult<Vec<DrawableOutput>> {
    let mut outputs = Vec::with_capacity(group.len());
    for (i, job) in group.iter().enumerate() {
        if i > 0 && failed.load(Ordering::SeqCst) {
            break;
        }
        outputs.push(transcoder.run(job)?);
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Density, TranscodeSettings};
    use crate::processing::testing::{FailingRasterizer, RecordingRasterizer};
    use crate::utils::TranscodeError;
    use std::fs;
    use std::path::Path;

    fn sources(dir: &Path, names: &[&str]) -> Vec<SourceFile> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                fs::write(&path, name.as_bytes()).unwrap();
                SourceFile::from_path(path)
            })
            .collect()
    }

    fn processor<R: Rasterizer>(output_dir: &Path, rasterizer: R) -> BatchProcessor<R> {
        let settings = TranscodeSettings::new()
            .into_dir(output_dir)
            .width(32)
            .densities("mdpi-xhdpi")
            .unwrap();
        BatchProcessor::new(&settings, rasterizer).unwrap()
    }

    #[test]
    fn groups_jobs_by_destination() {
        let a = SourceFile::new("x/icon.svg", "icon.svg");
        let b = SourceFile::new("y/icon.svg", "icon.svg");
        let out = Path::new("res");
        let jobs = vec![
            TranscodeJob::plan(&a, out, Density::Mdpi),
            TranscodeJob::plan(&a, out, Density::Hdpi),
            TranscodeJob::plan(&b, out, Density::Mdpi),
        ];

        let groups = group_by_destination(jobs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][1].source, PathBuf::from("y/icon.svg"));
        assert_eq!(groups[1][0].density, Density::Hdpi);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn writes_every_output() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("res");
        let pool = WorkerPool::new(processor(&output_dir, RecordingRasterizer::default()), Some(3));

        let summary = pool
            .process(sources(dir.path(), &["a.svg", "b.svg", "c.svg"]))
            .await
            .unwrap();

        assert_eq!(summary.sources, 3);
        assert_eq!(summary.outputs.len(), 9);
        for density in ["mdpi", "hdpi", "xhdpi"] {
            for name in ["a", "b", "c"] {
                let path = output_dir.join(format!("drawable-{density}")).join(format!("{name}.png"));
                assert_eq!(fs::read(&path).unwrap(), format!("png:{name}.svg").into_bytes());
            }
        }
        assert_eq!(pool.active_workers(), 0);
    }

    #[tokio::test]
    async fn single_worker_stops_after_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pool = WorkerPool::new(processor(&dir.path().join("res"), FailingRasterizer::always()), Some(1));

        let err = pool
            .process(sources(dir.path(), &["a.svg", "b.svg"]))
            .await
            .unwrap_err();

        assert!(matches!(err, TranscodeError::RasterizationFailed { .. }));
        assert_eq!(pool.processor().transcoder().rasterizer().calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn waiting_group_is_dropped_once_a_failure_is_seen() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("res");
        let pool = WorkerPool::new(processor(&output_dir, FailingRasterizer::on_call(1)), Some(1));

        let err = pool
            .process(sources(dir.path(), &["a.svg", "b.svg", "c.svg"]))
            .await
            .unwrap_err();

        // Later groups were queued behind the only permit when the first one failed
        assert!(matches!(err, TranscodeError::RasterizationFailed { ref path, .. } if path.ends_with("a.svg")));
        assert_eq!(pool.processor().transcoder().rasterizer().calls(), 1);
        assert!(!output_dir.join("drawable-hdpi").join("a.png").exists());
        assert!(!output_dir.join("drawable-mdpi").join("b.png").exists());
        assert_eq!(pool.active_workers(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reports_failure_with_many_workers() {
        let dir = tempfile::tempdir().unwrap();
        let pool = WorkerPool::new(processor(&dir.path().join("res"), FailingRasterizer::on_call(2)), Some(4));

        let result = pool.process(sources(dir.path(), &["a.svg", "b.svg", "c.svg"])).await;

        assert!(matches!(result, Err(TranscodeError::RasterizationFailed { .. })));
        assert!(pool.processor().transcoder().rasterizer().calls() <= 9);
    }

    #[test]
    fn worker_count_is_at_least_one() {
        let dir = tempfile::tempdir().unwrap();
        let pool = WorkerPool::new(processor(dir.path(), RecordingRasterizer::default()), Some(0));
        assert_eq!(pool.worker_count(), 1);
    }
}
