//! Minimal job runner: each registered job gets its own tokio task ticking
//! at the job's interval until stop.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::interfaces::scheduler::ScheduledJob;

#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<Arc<dyn ScheduledJob>>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_job(&mut self, job: Arc<dyn ScheduledJob>) {
        self.jobs.push(job);
    }

    pub fn start(&mut self) {
        for job in &self.jobs {
            let job = job.clone();
            info!(job = job.name(), "scheduling job");
            let handle = tokio::spawn(async move {
                let mut tick = tokio::time::interval(job.interval());
                // The first tick fires immediately; skip it so a fresh start
                // does not run every job at once.
                tick.tick().await;
                loop {
                    tick.tick().await;
                    if let Err(err) = job.run().await {
                        warn!(job = job.name(), %err, "scheduled job failed");
                    }
                }
            });
            self.handles.push(handle);
        }
    }

    pub async fn stop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("scheduler stopped");
    }
}
