//! Dedicated single-thread pool for rendering (spec.md §4.4 "Rendering
//! trigger", §5 "separate 1-thread output pool"). Overlaps a tick's
//! snapshot write with the next tick's Phases A-D; the engine only
//! blocks on it at the boundary before Phase E.

use crossbeam_channel::{bounded, Sender};
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send>;

enum Message {
    Run(Job),
    Shutdown,
}

pub struct RenderPool {
    sender: Sender<Message>,
    handle: Option<JoinHandle<()>>,
}

impl RenderPool {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded::<Message>();
        let handle = std::thread::Builder::new()
            .name("fluid-render".to_string())
            .spawn(move || {
                for msg in receiver.iter() {
                    match msg {
                        Message::Run(job) => job(),
                        Message::Shutdown => break,
                    }
                }
            })
            .expect("failed to spawn render thread");
        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Queue a render job. Never blocks the caller.
    pub fn submit(&self, job: impl FnOnce() + Send + 'static) {
        if self.sender.send(Message::Run(Box::new(job))).is_err() {
            tracing::error!(target: "workers.render", "render pool receiver gone, dropping job");
        }
    }

    /// Block until every job submitted before this call has finished.
    pub fn wait_idle(&self) {
        let (tx, rx) = bounded::<()>(1);
        self.submit(move || {
            let _ = tx.send(());
        });
        let _ = rx.recv();
    }
}

impl Default for RenderPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RenderPool {
    fn drop(&mut self) {
        let _ = self.sender.send(Message::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn jobs_run_and_wait_idle_blocks_until_done() {
        let pool = RenderPool::new();
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..5 {
            let c = counter.clone();
            pool.submit(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.wait_idle();
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn drop_joins_the_thread() {
        let pool = RenderPool::new();
        pool.submit(|| {});
        drop(pool);
    }
}
