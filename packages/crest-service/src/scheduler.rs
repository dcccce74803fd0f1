//! Single-worker queue for index mutations. Writes land in submission order,
//! which keeps rebuilds and commit-triggered updates from interleaving.

use tokio::{
	sync::{mpsc, oneshot},
	task::JoinHandle,
};

use crate::{
	BoxFuture,
	error::{Error, Result},
};

struct Job {
	label: String,
	task: BoxFuture<'static, Result<()>>,
	done: oneshot::Sender<Result<()>>,
}

async fn run_worker(mut rx: mpsc::UnboundedReceiver<Job>) {
	while let Some(job) = rx.recv().await {
		let result = job.task.await;

		if let Err(err) = &result {
			tracing::error!(error = %err, task = %job.label, "Index task failed.");
		}

		// The submitter may have dropped its handle instead of waiting.
		let _ = job.done.send(result);
	}
}

#[derive(Debug)]
pub struct IndexScheduler {
	tx: mpsc::UnboundedSender<Job>,
	worker: JoinHandle<()>,
}
impl IndexScheduler {
	pub fn start() -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		let worker = tokio::spawn(run_worker(rx));

		Self { tx, worker }
	}

	/// Queues `task` behind every previously submitted task.
	pub fn submit(
		&self,
		label: impl Into<String>,
		task: BoxFuture<'static, Result<()>>,
	) -> TaskHandle {
		let (done, waiter) = oneshot::channel();
		let job = Job { label: label.into(), task, done };

		if let Err(mpsc::error::SendError(job)) = self.tx.send(job) {
			tracing::error!(task = %job.label, "Index scheduler is stopped; dropping task.");

			let _ = job.done.send(Err(Error::SchedulerStopped));
		}

		TaskHandle { waiter }
	}

	/// Runs every queued task to completion, then stops the worker.
	pub async fn shutdown(self) {
		drop(self.tx);

		if let Err(err) = self.worker.await {
			tracing::error!(error = %err, "Index worker did not shut down cleanly.");
		}
	}
}

/// Completion handle for one scheduled task.
#[derive(Debug)]
pub struct TaskHandle {
	waiter: oneshot::Receiver<Result<()>>,
}
impl TaskHandle {
	/// Waits for the task to run and returns its outcome.
	pub async fn wait(self) -> Result<()> {
		self.waiter.await.unwrap_or(Err(Error::SchedulerStopped))
	}
}
