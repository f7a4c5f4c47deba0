//! Export, backup and restore off the caller's thread.
//!
//! One job at a time: submitting while another job runs fails with
//! `AppError::JobInFlight`. Each job opens its own connection and reports
//! its outcome on a channel.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::logic::ExportLogic;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
pub enum Job {
    ExportCsv,
    BackupJson { compress: bool },
    Restore { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Exported(PathBuf),
    BackedUp(PathBuf),
    Restored { path: PathBuf, rows: usize },
}

/// Clears the in-flight flag when the worker ends, even by panic.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone, Default)]
pub struct JobRunner {
    busy: Arc<AtomicBool>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn submit(&self, job: Job, cfg: &Config, today: NaiveDate) -> AppResult<JobHandle> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::JobInFlight);
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let cfg = cfg.clone();
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("wstation-export".into())
            .spawn(move || {
                let _guard = guard;
                let result = run_job(job, &cfg, today);
                let _ = tx.send(result);
            });

        match spawned {
            Ok(handle) => Ok(JobHandle { rx, handle }),
            // the closure (and its guard) is dropped on failure, clearing the flag
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

pub struct JobHandle {
    rx: Receiver<AppResult<JobOutcome>>,
    handle: JoinHandle<()>,
}

impl JobHandle {
    /// Block until the job reports back.
    pub fn wait(self) -> AppResult<JobOutcome> {
        let result = self.rx.recv();
        self.handle
            .join()
            .map_err(|_| AppError::Other("export worker panicked".into()))?;
        result.map_err(|_| AppError::Other("export worker ended without a result".into()))?
    }

    /// Non-blocking poll; `None` while the job is still running.
    pub fn try_result(&self) -> Option<AppResult<JobOutcome>> {
        match self.rx.try_recv() {
            Ok(r) => Some(r),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AppError::Other(
                "export worker ended without a result".into(),
            ))),
        }
    }
}

fn run_job(job: Job, cfg: &Config, today: NaiveDate) -> AppResult<JobOutcome> {
    let mut pool = DbPool::open(&cfg.database)?;

    match job {
        Job::ExportCsv => ExportLogic::export_csv(&mut pool, cfg, today).map(JobOutcome::Exported),
        Job::BackupJson { compress } => {
            ExportLogic::backup_json(&mut pool, cfg, today, compress).map(JobOutcome::BackedUp)
        }
        Job::Restore { path } => {
            let rows = ExportLogic::restore_json(&mut pool, &path)?;
            Ok(JobOutcome::Restored { path, rows })
        }
    }
}
