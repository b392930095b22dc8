//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the composable todo store.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{ReducerTest, SequentialIdGenerator};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(SequentialIdGenerator::new())))
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::create("Buy milk"))
//!     .then_state(|state| assert_eq!(state.len(), 1))
//!     .run();
//! ```

/// Given-When-Then reducer harness
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use composable_todo_core::environment::IdGenerator;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Deterministic id generator for tests
    ///
    /// Yields `{prefix}-1`, `{prefix}-2`, ... (prefix defaults to `todo`).
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::SequentialIdGenerator;
    /// use composable_todo_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.generate(), "todo-1");
    /// assert_eq!(ids.generate(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator with the `todo` prefix
        #[must_use]
        pub fn new() -> Self {
            Self::with_prefix("todo")
        }

        /// Create a generator with a custom prefix
        #[must_use]
        pub fn with_prefix(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::SeqCst) - 1
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Id generator replaying a fixed script, then falling back to a sequence
    ///
    /// Useful to force collisions with ids already present in a state.
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: std::sync::Mutex<std::collections::VecDeque<String>>,
        fallback: SequentialIdGenerator,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that yields `script` first
        #[must_use]
        pub fn new<I, T>(script: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: std::sync::Mutex::new(script.into_iter().map(Into::into).collect()),
                fallback: SequentialIdGenerator::with_prefix("scripted"),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn generate(&self) -> String {
            let scripted = match self.script.lock() {
                Ok(mut script) => script.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };
            scripted.unwrap_or_else(|| self.fallback.generate())
        }
    }
}

/// Test helpers
pub mod helpers {
    /// Install a `tracing` subscriber writing to the test output
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{ScriptedIdGenerator, SequentialIdGenerator};
pub use reducer_test::{assertions, ReducerTest};
