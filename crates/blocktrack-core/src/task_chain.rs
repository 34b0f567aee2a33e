use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Serializes mutations of some shared state `T` through a single pending-task slot.
///
/// Every call to [`submit`](Self::submit) first waits for the previously submitted task to finish, then spawns its own task on
/// a worker thread and returns without waiting for it. At most one task is in flight at any time, and tasks run in the order
/// their submitters got past the wait. Readers also wait for the in-flight task, so a read observes every mutation submitted
/// before it.
///
/// Dropping the chain waits for the in-flight task.
pub struct TaskChain<T> {
    state: Arc<Mutex<T>>,
    pending: Mutex<Option<JoinHandle<()>>>,
    thread_name: String,
}

impl<T> TaskChain<T>
where
    T: Send + 'static,
{
    pub fn new(state: T) -> Self {
        Self::with_thread_name(state, "blocktrack-task")
    }

    /// Like [`new`](Self::new), but worker threads are given `thread_name`.
    pub fn with_thread_name(state: T, thread_name: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            pending: Mutex::new(None),
            thread_name: thread_name.into(),
        }
    }

    /// Waits for the in-flight task (if any), then schedules `task` to run asynchronously on the state.
    ///
    /// If a worker thread can't be spawned, `task` runs on the calling thread instead. Order is preserved either way.
    pub fn submit(&self, task: impl FnOnce(&mut T) + Send + 'static) {
        // The slot stays locked until the successor is stored, so concurrent submitters queue up behind each other here.
        let mut pending = self.pending.lock();
        reap(&mut pending);

        // The task is shared with the spawned closure so it can be recovered if spawning fails.
        let task = Arc::new(Mutex::new(Some(task)));
        let state = Arc::clone(&self.state);
        let worker_task = Arc::clone(&task);
        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                let task = worker_task.lock().take();
                if let Some(task) = task {
                    task(&mut *state.lock());
                }
            });

        match spawned {
            Ok(handle) => *pending = Some(handle),
            Err(e) => {
                log::warn!(
                    "Failed to spawn {} worker ({}); running task inline",
                    self.thread_name,
                    e
                );
                let task = task.lock().take();
                if let Some(task) = task {
                    task(&mut *self.state.lock());
                }
            }
        }
    }

    /// Waits for the in-flight task (if any), then calls `reader` on the state.
    ///
    /// No other task can start until `reader` returns.
    pub fn read<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        let mut pending = self.pending.lock();
        reap(&mut pending);
        let state = self.state.lock();
        reader(&*state)
    }

    /// Blocks until the in-flight task (if any) has finished.
    pub fn wait(&self) {
        reap(&mut self.pending.lock());
    }

    /// Returns `true` if a task has been submitted and not yet reaped. The task itself might already be finished.
    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }
}

impl<T> Drop for TaskChain<T> {
    fn drop(&mut self) {
        reap(&mut self.pending.lock());
    }
}

fn reap(pending: &mut MutexGuard<'_, Option<JoinHandle<()>>>) {
    if let Some(handle) = pending.take() {
        if handle.join().is_err() {
            log::error!("A chained task panicked; its mutation may be partially applied");
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
