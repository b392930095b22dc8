//! Reducer logic for the todo store.
//!
//! Each field of [`TodoState`] is owned by one slice reducer:
//!
//! | Slice | Field | Reacts to |
//! |---|---|---|
//! | [`TodoListReducer`] | `todos` | create, edit, toggle, delete |
//! | [`SelectionReducer`] | `selected_todo` | select |
//! | [`MutationCounterReducer`] | `counter` | every `#[mutation]` action |
//!
//! [`TodoReducer`] scopes the three slices onto [`TodoState`] and runs them
//! in that order for every action. No action produces effects, and no
//! action can fail: an id that matches nothing leaves the list untouched.

use crate::types::{Todo, TodoAction, TodoId, TodoState};
use composable_todo_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer},
    effect::Effect,
    environment::{IdGenerator, UuidGenerator},
    reducer::Reducer,
    SmallVec,
};
use std::sync::Arc;

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Environment backed by time-ordered UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Slice reducer owning the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    fn find_mut<'a>(todos: &'a mut [Todo], id: &TodoId) -> Option<&'a mut Todo> {
        let found = todos.iter_mut().find(|todo| &todo.id == id);
        if found.is_none() {
            tracing::debug!(%id, "No todo with this id, list unchanged");
        }
        found
    }
}

impl Reducer for TodoListReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        todos: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::CreateTodo { desc } => {
                let id = TodoId::fresh(todos, env.ids.as_ref());
                tracing::debug!(%id, "Creating todo");
                todos.push(Todo::new(id, desc));
            },
            TodoAction::EditTodo { id, desc } => {
                if let Some(todo) = Self::find_mut(todos, &id) {
                    todo.desc = desc;
                }
            },
            TodoAction::ToggleTodo { id, is_complete } => {
                if let Some(todo) = Self::find_mut(todos, &id) {
                    todo.is_complete = is_complete;
                }
            },
            TodoAction::DeleteTodo { id } => {
                if let Some(index) = todos.iter().position(|todo| todo.id == id) {
                    todos.remove(index);
                } else {
                    tracing::debug!(%id, "No todo with this id, list unchanged");
                }
            },
            TodoAction::SelectTodo { .. } => {},
        }

        SmallVec::new()
    }
}

/// Slice reducer owning the selected todo id
///
/// Selection is not validated and is never cleared when the selected todo
/// is deleted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionReducer;

impl Reducer for SelectionReducer {
    type State = Option<TodoId>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        selected: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let TodoAction::SelectTodo { id } = action {
            *selected = Some(id);
        }
        SmallVec::new()
    }
}

/// Slice reducer counting mutating actions, matched or not
#[derive(Clone, Copy, Debug, Default)]
pub struct MutationCounterReducer;

impl Reducer for MutationCounterReducer {
    type State = u64;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        counter: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.is_mutation() {
            *counter += 1;
        }
        SmallVec::new()
    }
}

/// Reducer for the whole todo store
pub struct TodoReducer {
    slices: CombinedReducer<TodoState, TodoAction, TodoEnvironment>,
}

impl TodoReducer {
    /// Creates a new `TodoReducer` from the three slices
    #[must_use]
    pub fn new() -> Self {
        let slices = combine_reducers(vec![
            Box::new(scope_reducer(
                TodoListReducer,
                |state: &TodoState| &state.todos,
                |state: &mut TodoState, todos| state.todos = todos,
            )),
            Box::new(scope_reducer(
                SelectionReducer,
                |state: &TodoState| &state.selected_todo,
                |state: &mut TodoState, selected| state.selected_todo = selected,
            )),
            Box::new(scope_reducer(
                MutationCounterReducer,
                |state: &TodoState| &state.counter,
                |state: &mut TodoState, counter| state.counter = counter,
            )),
        ]);

        Self { slices }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoReducer")
            .field("slices", &self.slices.len())
            .finish()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    #[tracing::instrument(skip_all, fields(action = action.action_type()))]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.slices.reduce(state, action, env)
    }
}
