//! # Composable Todo Runtime
//!
//! Runtime implementation for the composable todo store.
//!
//! This crate provides the [`Store`] that owns state, runs the reducer for
//! every dispatched action, and executes the effects the reducer returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, serializes dispatch, exposes read access
//! - **Observers**: Hooks notified with each applied action and resulting state
//! - **Config**: [`StoreConfig`] with environment-variable loading
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use composable_todo_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store configuration and environment loading
pub mod config;

/// Metric names and descriptions
pub mod metrics;

/// Dispatch observers (logging hook)
pub mod observer;

pub use config::{ConfigError, StoreConfig};
pub use observer::{LoggingObserver, Observer};
pub use store::Store;

/// Store module - the runtime coordinator
pub mod store {
    use super::{Arc, Effect, Reducer, RwLock, StoreConfig};
    use crate::metrics::{ACTIONS_TOTAL, FOLLOW_UP_ACTIONS_TOTAL, REDUCER_DURATION_SECONDS};
    use crate::observer::{LoggingObserver, Observer};
    use composable_todo_core::SmallVec;
    use std::collections::VecDeque;
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the write lock is held for a whole reducer step)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Observers and the action broadcast
    ///
    /// Readers never see a partially applied action: state is only readable
    /// between reducer steps.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        observers: Vec<Box<dyn Observer<S, A>>>,
        /// Every applied action is broadcast to subscribers, in dispatch order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`] for the broadcast capacity and
        /// installs no observers.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(StoreConfig::default().broadcast_capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                observers: Vec::new(),
                action_broadcast,
            }
        }

        /// Create a new Store with custom configuration
        ///
        /// When `config.log_dispatches` is set, a [`LoggingObserver`] is
        /// installed.
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self
        where
            S: std::fmt::Debug,
            A: std::fmt::Debug,
        {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            let mut store = Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                observers: Vec::new(),
                action_broadcast,
            };

            if config.log_dispatches {
                store = store.with_observer(LoggingObserver::new());
            }

            store
        }

        /// Register an observer notified after every applied action
        ///
        /// Observers run in registration order while the state is still
        /// locked, so each one sees exactly the state its action produced.
        #[must_use]
        pub fn with_observer(mut self, observer: impl Observer<S, A> + 'static) -> Self {
            self.observers.push(Box::new(observer));
            self
        }

        /// Send an action to the store
        ///
        /// This method:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Notifies observers and broadcasts the action
        /// 4. Awaits returned `Effect::Future`s in order; produced actions are
        ///    dispatched next, in the order they were produced
        ///
        /// `send()` returns once the action and all follow-up actions have
        /// been applied. Concurrent `send()` calls serialize at the reducer.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) {
            let mut pending = VecDeque::from([action]);
            let mut follow_ups = 0_u64;

            while let Some(action) = pending.pop_front() {
                let effects = self.apply(action).await;

                for effect in effects {
                    match effect {
                        Effect::None => tracing::trace!("Executing Effect::None (no-op)"),
                        Effect::Future(future) => {
                            tracing::trace!("Executing Effect::Future");
                            if let Some(next) = future.await {
                                tracing::trace!("Effect::Future produced an action");
                                follow_ups += 1;
                                pending.push_back(next);
                            }
                        },
                    }
                }
            }

            if follow_ups > 0 {
                metrics::counter!(FOLLOW_UP_ACTIONS_TOTAL).increment(follow_ups);
            }
            tracing::debug!(follow_ups, "Action processing completed");
        }

        /// Apply a single action under the write lock and return its effects
        async fn apply(&self, action: A) -> SmallVec<[Effect<A>; 4]> {
            metrics::counter!(ACTIONS_TOTAL).increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let observed = action.clone();

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut *state, action, &self.environment);
            metrics::histogram!(REDUCER_DURATION_SECONDS).record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());

            for observer in &self.observers {
                observer.on_action(&observed, &*state);
            }

            // No subscribers is not an error
            let _ = self.action_broadcast.send(observed);

            effects
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone the current state
        pub async fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state(S::clone).await
        }

        /// Subscribe to all actions applied by this store
        ///
        /// The receiver gets a clone of every applied action, including
        /// actions produced by effects, in the order they were applied.
        /// Slow receivers observe `RecvError::Lagged` and skip ahead.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }
    }
}
