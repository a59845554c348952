//! Row-partitioned task execution for the tick engine's parallelizable
//! phases (spec.md §5: Phases A, B, D are row-parallel).
//!
//! The original's `WorkerHandler` keeps a persistent thread pool that
//! claims row indices from a shared atomic counter and blocks the caller
//! on a completion barrier. `std::thread::scope` gives the same
//! claim-and-barrier shape without `unsafe`: threads claim rows from an
//! `AtomicUsize`, the scope itself is the barrier.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Runs `task(row)` for every `row` in `0..rows`, distributed across up to
/// `num_threads` threads, and blocks until every row has completed.
///
/// `task` must be safe to call concurrently from multiple threads for
/// distinct rows — callers synchronize any cross-row writes themselves
/// (per-cell mutexes on the engine's shared state).
pub fn run_rows<F>(rows: usize, num_threads: usize, task: F)
where
    F: Fn(usize) + Sync,
{
    if rows == 0 {
        return;
    }
    let num_threads = num_threads.max(1).min(rows);
    if num_threads == 1 {
        for row in 0..rows {
            task(row);
        }
        return;
    }

    let next_row = AtomicUsize::new(0);
    std::thread::scope(|scope| {
        for _ in 0..num_threads {
            scope.spawn(|| loop {
                let row = next_row.fetch_add(1, Ordering::Relaxed);
                if row >= rows {
                    break;
                }
                task(row);
            });
        }
    });
}

/// A fixed worker count, carried across many `run_rows` calls within one
/// tick so the engine doesn't have to thread a thread-count argument
/// through every phase method.
#[derive(Clone, Copy, Debug)]
pub struct RowWorkerPool {
    num_threads: usize,
}

impl RowWorkerPool {
    pub fn new(num_threads: usize) -> Self {
        assert!(num_threads >= 1, "worker pool requires at least 1 thread");
        Self { num_threads }
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn run_rows<F>(&self, rows: usize, task: F)
    where
        F: Fn(usize) + Sync,
    {
        run_rows(rows, self.num_threads, task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn visits_every_row_exactly_once() {
        let seen = Mutex::new(vec![0u32; 10]);
        run_rows(10, 4, |row| {
            seen.lock().unwrap()[row] += 1;
        });
        assert!(seen.lock().unwrap().iter().all(|&c| c == 1));
    }

    #[test]
    fn single_thread_runs_in_order() {
        let order = Mutex::new(Vec::new());
        run_rows(5, 1, |row| order.lock().unwrap().push(row));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_rows_is_a_no_op() {
        run_rows(0, 4, |_| panic!("should not be called"));
    }

    #[test]
    fn pool_reuses_thread_count() {
        let pool = RowWorkerPool::new(3);
        let seen = Mutex::new(vec![0u32; 7]);
        pool.run_rows(7, |row| seen.lock().unwrap()[row] += 1);
        assert!(seen.lock().unwrap().iter().all(|&c| c == 1));
    }
}
