//! Worker-side report execution. Generation runs on a spawned thread and its
//! result is marshalled back to the calling (interactive) thread over a
//! channel; an in-flight flag rejects a second run while one is active.

use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::report::{ReportRow, ReportSummary};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

/// Everything a worker needs, captured by value so the caller's state is
/// never shared with the thread.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub db_path: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub categoria: Option<String>,
}

type ReportOutcome = AppResult<(Vec<ReportRow>, ReportSummary)>;

#[derive(Debug)]
pub struct ReportHandle {
    rx: mpsc::Receiver<ReportOutcome>,
}

impl ReportHandle {
    /// Block the calling thread until the worker finishes.
    pub fn join(self) -> ReportOutcome {
        self.rx
            .recv()
            .map_err(|_| AppError::Export("report worker terminated unexpectedly".into()))?
    }
}

pub struct ReportRunner {
    in_flight: Arc<AtomicBool>,
}

impl Default for ReportRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRunner {
    pub fn new() -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start a generation on a worker thread. Range validation short-circuits
    /// before the in-flight flag is touched; `Busy` is returned when a run is
    /// already active. The flag is cleared on every exit path of the worker.
    pub fn spawn(&self, req: ReportRequest) -> AppResult<ReportHandle> {
        ReportLogic::validate_range(req.start, req.end)?;

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AppError::Busy);
        }

        let guard = Arc::clone(&self.in_flight);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = (|| {
                let mut pool = DbPool::new(&req.db_path)?;
                ReportLogic::generate(&mut pool, req.start, req.end, req.categoria.as_deref())
            })();

            guard.store(false, Ordering::SeqCst);
            // The receiver may be gone; nothing to do then.
            tx.send(outcome).ok();
        });

        Ok(ReportHandle { rx })
    }

    /// Convenience wrapper: spawn and wait for the result.
    pub fn generate(&self, req: ReportRequest) -> ReportOutcome {
        self.spawn(req)?.join()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::personas;
    use crate::models::persona::Persona;
    use std::env;
    use std::fs;

    fn temp_db(name: &str) -> String {
        let path = env::temp_dir().join(format!("checador_runner_{name}.sqlite"));
        fs::remove_file(&path).ok();
        let db = path.to_string_lossy().to_string();

        let pool = DbPool::new(&db).unwrap();
        init_db(&pool.conn).unwrap();
        let p = Persona::new("Ana", "Test", "A100", "Asesor");
        personas::insert_persona(&pool.conn, &p).unwrap();
        db
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn invalid_range_short_circuits_without_taking_the_guard() {
        let runner = ReportRunner::new();
        let err = runner
            .spawn(ReportRequest {
                db_path: "/nonexistent.sqlite".into(),
                start: d("2025-09-10"),
                end: d("2025-09-01"),
                categoria: None,
            })
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRange(_)));
        assert!(!runner.is_busy());
    }

    #[test]
    fn generate_runs_off_thread_and_clears_the_guard() {
        let db = temp_db("ok");
        let runner = ReportRunner::new();

        let (rows, summary) = runner
            .generate(ReportRequest {
                db_path: db,
                start: d("2025-09-01"),
                end: d("2025-09-03"),
                categoria: None,
            })
            .unwrap();

        assert!(rows.is_empty());
        assert_eq!(summary.total_registros, 0);
        assert!(!runner.is_busy());
    }

    #[test]
    fn runner_is_reusable_after_a_run() {
        let db = temp_db("reuse");
        let runner = ReportRunner::new();
        let req = ReportRequest {
            db_path: db,
            start: d("2025-09-01"),
            end: d("2025-09-01"),
            categoria: Some("Asesor".into()),
        };

        runner.generate(req.clone()).unwrap();
        runner.generate(req).unwrap();
        assert!(!runner.is_busy());
    }
}
