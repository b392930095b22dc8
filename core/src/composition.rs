//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one field ("slice") of a larger state
//!
//! A store state is usually assembled from slices: each slice reducer owns
//! one field, is scoped onto the parent state, and the scoped reducers are
//! combined into the reducer handed to the store.
//!
//! # Examples
//!
//! ```
//! use composable_todo_core::composition::{combine_reducers, scope_reducer};
//! use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     hits: u32,
//!     last: Option<String>,
//! }
//!
//! #[derive(Clone)]
//! struct Visit(String);
//!
//! struct HitsReducer;
//! struct LastReducer;
//!
//! impl Reducer for HitsReducer {
//!     type State = u32;
//!     type Action = Visit;
//!     type Environment = ();
//!
//!     fn reduce(&self, hits: &mut u32, _action: Visit, _env: &()) -> SmallVec<[Effect<Visit>; 4]> {
//!         *hits += 1;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for LastReducer {
//!     type State = Option<String>;
//!     type Action = Visit;
//!     type Environment = ();
//!
//!     fn reduce(&self, last: &mut Option<String>, Visit(page): Visit, _env: &()) -> SmallVec<[Effect<Visit>; 4]> {
//!         *last = Some(page);
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let reducer = combine_reducers(vec![
//!     Box::new(scope_reducer(HitsReducer, |s: &AppState| &s.hits, |s: &mut AppState, v| s.hits = v)),
//!     Box::new(scope_reducer(LastReducer, |s: &AppState| &s.last, |s: &mut AppState, v| s.last = v)),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = reducer.reduce(&mut state, Visit("/home".to_string()), &());
//! assert_eq!(state.hits, 1);
//! assert_eq!(state.last.as_deref(), Some("/home"));
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// A boxed reducer that can be shared with the store across tasks
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence on the same action, and all effects are
/// collected and concatenated in reducer order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true when no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The sub-state is cloned out, reduced, and written back whole, so the
/// parent only ever holds a fully reduced slice.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn(A, &E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut sub_state = (self.get_state)(state).clone();

        let effects = self.reducer.reduce(&mut sub_state, action, env);

        (self.set_state)(state, sub_state);

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => state.counter += 1,
                TestAction::Decrement => state.counter -= 1,
                TestAction::SetName(_) => {},
            }
            smallvec![Effect::None]
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
                return smallvec![Effect::future(async { Some(TestAction::Increment) })];
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);
        assert_eq!(combined.len(), 2);

        let mut state = TestState::default();

        let effects = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);
        assert!(effects.is_empty());

        let effects = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");
        assert_eq!(effects.len(), 1);

        let _ = combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
    }

    #[test]
    fn test_combine_no_reducers_is_identity() {
        let combined: CombinedReducer<TestState, TestAction, ()> = combine_reducers(Vec::new());
        assert!(combined.is_empty());

        let mut state = TestState { counter: 3, name: "x".to_string() };
        let effects = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 3);
        assert!(effects.is_empty());
    }

    struct SliceReducer;

    impl Reducer for SliceReducer {
        type State = Vec<i32>;
        type Action = i32;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            state.push(action);
            smallvec![Effect::None]
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        values: Vec<i32>,
        other: String,
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scope_reducer(
            SliceReducer,
            |parent: &ParentState| &parent.values,
            |parent: &mut ParentState, values| parent.values = values,
        );

        let mut state = ParentState {
            values: vec![1],
            other: "test".to_string(),
        };

        let _ = scoped.reduce(&mut state, 2, &());
        let _ = scoped.reduce(&mut state, 3, &());
        assert_eq!(state.values, vec![1, 2, 3]);
        assert_eq!(state.other, "test");
    }
}
