//! Todo list store built on the composable reducer architecture.
//!
//! The store keeps an ordered list of todos, the id of the selected todo,
//! and a counter of mutating actions. Five actions drive it:
//!
//! - `CreateTodo`, `EditTodo`, `ToggleTodo`, `DeleteTodo` mutate the list and
//!   always bump the counter, even when the id matches nothing
//! - `SelectTodo` only moves the selection
//!
//! # Quick Start
//!
//! ```no_run
//! use composable_todo_runtime::StoreConfig;
//! use todo_store::{new_store, TodoAction, TodoEnvironment};
//!
//! # async fn example() {
//! let store = new_store(TodoEnvironment::production(), StoreConfig::default());
//!
//! store.send(TodoAction::create("Buy milk")).await;
//!
//! let id = store.state(|s| s.todos.last().map(|t| t.id.clone())).await;
//! if let Some(id) = id {
//!     store.send(TodoAction::toggle(id, true)).await;
//! }
//!
//! let state = store.snapshot().await;
//! println!("{} todos, {} mutations", state.len(), state.counter);
//! # }
//! ```

pub mod reducer;
pub mod types;

use composable_todo_runtime::{Store, StoreConfig};

// Re-export commonly used types
pub use reducer::{MutationCounterReducer, SelectionReducer, TodoEnvironment, TodoListReducer, TodoReducer};
pub use types::{Todo, TodoAction, TodoId, TodoState, MAX_ID_DRAWS, SEED_TODOS};

/// The todo store
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Creates a store holding the seeded initial state
///
/// Seed ids are drawn from the same generator as later todos.
#[must_use]
pub fn new_store(env: TodoEnvironment, config: StoreConfig) -> TodoStore {
    let initial = TodoState::seeded(env.ids.as_ref());
    Store::with_config(initial, TodoReducer::new(), env, config)
}
