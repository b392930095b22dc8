//! Dispatch observers
//!
//! An [`Observer`] is told about every action a store applies, together
//! with the state that action produced. Observers cannot change state; a
//! store behaves identically with or without them.

/// Hook called after each applied action
///
/// Closures `Fn(&A, &S)` implement this trait directly.
pub trait Observer<S, A>: Send + Sync {
    /// Called with the applied action and the resulting state
    fn on_action(&self, action: &A, state: &S);
}

impl<S, A, F> Observer<S, A> for F
where
    F: Fn(&A, &S) + Send + Sync,
{
    fn on_action(&self, action: &A, state: &S) {
        self(action, state);
    }
}

/// Logs each applied action and the resulting state through `tracing`
///
/// Events are emitted at `INFO` under the target
/// `composable_todo_runtime::dispatch`, with `action` and `next_state`
/// fields. The state before the action is not logged: observers only see
/// the state an action produced, and retaining the previous one would
/// require cloning the whole state on every dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    /// Create a new logging observer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S, A> Observer<S, A> for LoggingObserver
where
    S: std::fmt::Debug,
    A: std::fmt::Debug,
{
    fn on_action(&self, action: &A, state: &S) {
        tracing::info!(
            target: "composable_todo_runtime::dispatch",
            ?action,
            next_state = ?state,
            "action applied"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn closures_are_observers() {
        let calls = AtomicUsize::new(0);
        let observer = |_: &u8, state: &u32| {
            calls.fetch_add(*state as usize, Ordering::SeqCst);
        };

        observer.on_action(&1, &3);
        observer.on_action(&1, &4);

        assert_eq!(calls.load(Ordering::SeqCst), 7);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logging_observer_emits_action_and_state() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            LoggingObserver::new().on_action(&"CREATE_TODO", &vec![1, 2, 3]);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains("composable_todo_runtime::dispatch"), "{output}");
        assert!(output.contains("action applied"), "{output}");
        assert!(output.contains("CREATE_TODO"), "{output}");
        assert!(output.contains("next_state=[1, 2, 3]"), "{output}");
    }
}
