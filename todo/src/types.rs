//! Domain types for the todo store.
//!
//! The store tracks three things: an ordered list of todos, the id of the
//! currently selected todo, and a counter of mutating actions.

use composable_todo_core::environment::IdGenerator;
use composable_todo_macros::Action;
use serde::{Deserialize, Serialize};

/// Descriptions and completion flags of the todos every store starts with
pub const SEED_TODOS: [(&str, bool); 3] = [
    ("Learn React", true),
    ("Learn Redux", true),
    ("Learn Redux-ToolKit", false),
];

/// Generator draws [`TodoId::fresh`] makes before suffixing
pub const MAX_ID_DRAWS: usize = 8;

/// Unique identifier for a todo item
///
/// Any string is a valid lookup key; ids of stored todos come from the
/// environment's [`IdGenerator`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Draw ids from `ids` until one is not used by any of `todos`
    ///
    /// After [`MAX_ID_DRAWS`] colliding draws the last draw gets a numeric
    /// suffix (`id-1`, `id-2`, ..) instead, so a generator that keeps
    /// repeating itself cannot stall the caller.
    #[must_use]
    pub fn fresh(todos: &[Todo], ids: &dyn IdGenerator) -> Self {
        let taken = |candidate: &Self| todos.iter().any(|todo| &todo.id == candidate);

        let mut candidate = Self(ids.generate());
        for _ in 1..MAX_ID_DRAWS {
            if !taken(&candidate) {
                return candidate;
            }
            tracing::debug!(id = %candidate, "Generated id already in use, drawing another");
            candidate = Self(ids.generate());
        }
        if !taken(&candidate) {
            return candidate;
        }

        tracing::warn!(
            id = %candidate,
            draws = MAX_ID_DRAWS,
            "Id generator keeps returning ids in use, suffixing the last one"
        );
        let mut suffix = 1_usize;
        loop {
            let suffixed = Self(format!("{}-{suffix}", candidate.0));
            if !taken(&suffixed) {
                return suffixed;
            }
            suffix += 1;
        }
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, fixed for the todo's lifetime
    pub id: TodoId,
    /// Description text (may be empty)
    pub desc: String,
    /// Whether the todo is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates a new, incomplete todo
    #[must_use]
    pub const fn new(id: TodoId, desc: String) -> Self {
        Self {
            id,
            desc,
            is_complete: false,
        }
    }
}

/// State of the todo store
///
/// `selected_todo` is a weak reference by id: deleting the selected todo
/// does not clear it. Use [`TodoState::selected`] to resolve it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Id of the selected todo, if any
    pub selected_todo: Option<TodoId>,
    /// Number of create/edit/toggle/delete actions applied
    pub counter: u64,
}

impl TodoState {
    /// Creates the initial store state: the [`SEED_TODOS`], nothing
    /// selected, counter at zero
    #[must_use]
    pub fn seeded(ids: &dyn IdGenerator) -> Self {
        let mut todos: Vec<Todo> = Vec::with_capacity(SEED_TODOS.len());
        for (desc, is_complete) in SEED_TODOS {
            let id = TodoId::fresh(&todos, ids);
            todos.push(Todo {
                id,
                desc: desc.to_string(),
                is_complete,
            });
        }

        Self {
            todos,
            selected_todo: None,
            counter: 0,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_complete).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves the selection; `None` when nothing is selected or the
    /// selected todo no longer exists
    #[must_use]
    pub fn selected(&self) -> Option<&Todo> {
        self.selected_todo.as_ref().and_then(|id| self.get(id))
    }
}

/// Actions accepted by the todo store
///
/// Serialized as `{ "type": "CREATE_TODO", "payload": { .. } }`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo with a freshly generated id
    #[mutation]
    CreateTodo {
        /// Description of the new todo
        desc: String,
    },

    /// Replace the description of a todo
    #[mutation]
    EditTodo {
        /// Todo to edit
        id: TodoId,
        /// New description
        desc: String,
    },

    /// Set the completion flag of a todo
    #[mutation]
    ToggleTodo {
        /// Todo to update
        id: TodoId,
        /// New completion flag
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },

    /// Remove a todo
    #[mutation]
    DeleteTodo {
        /// Todo to remove
        id: TodoId,
    },

    /// Select a todo (no existence check)
    SelectTodo {
        /// Todo to select
        id: TodoId,
    },
}

impl TodoAction {
    /// Creates a `CreateTodo` action
    #[must_use]
    pub fn create(desc: impl Into<String>) -> Self {
        Self::CreateTodo { desc: desc.into() }
    }

    /// Creates an `EditTodo` action
    #[must_use]
    pub fn edit(id: impl Into<TodoId>, desc: impl Into<String>) -> Self {
        Self::EditTodo {
            id: id.into(),
            desc: desc.into(),
        }
    }

    /// Creates a `ToggleTodo` action
    #[must_use]
    pub fn toggle(id: impl Into<TodoId>, is_complete: bool) -> Self {
        Self::ToggleTodo {
            id: id.into(),
            is_complete,
        }
    }

    /// Creates a `DeleteTodo` action
    #[must_use]
    pub fn delete(id: impl Into<TodoId>) -> Self {
        Self::DeleteTodo { id: id.into() }
    }

    /// Creates a `SelectTodo` action
    #[must_use]
    pub fn select(id: impl Into<TodoId>) -> Self {
        Self::SelectTodo { id: id.into() }
    }
}
