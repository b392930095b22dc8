//! Demo binary for the todo store.
//!
//! Walks through create, toggle, edit, select and delete on the seeded
//! store, printing the state as JSON after each step. Set
//! `TODO_STORE_LOG_DISPATCHES=true` to log every applied action.

use anyhow::Context;
use composable_todo_runtime::{metrics::describe_metrics, StoreConfig};
use todo_store::{new_store, TodoAction, TodoEnvironment, TodoState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_state(label: &str, state: &TodoState) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(state).context("serializing state")?;
    println!("\n>>> {label}\n{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_store=debug,composable_todo_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    describe_metrics();

    let config = StoreConfig::from_env().context("loading store configuration")?;
    let store = new_store(TodoEnvironment::production(), config);

    print_state("Initial state", &store.snapshot().await)?;

    store.send(TodoAction::create("Buy milk")).await;
    let state = store.snapshot().await;
    print_state("After CREATE_TODO", &state)?;

    let id = state
        .todos
        .last()
        .map(|todo| todo.id.clone())
        .context("created todo missing from state")?;

    store.send(TodoAction::toggle(id.clone(), true)).await;
    print_state("After TOGGLE_TODO", &store.snapshot().await)?;

    store.send(TodoAction::edit(id.clone(), "Buy oat milk")).await;
    store.send(TodoAction::select(id.clone())).await;
    print_state("After EDIT_TODO and SELECT_TODO", &store.snapshot().await)?;

    store.send(TodoAction::delete(id)).await;
    let state = store.snapshot().await;
    print_state("After DELETE_TODO", &state)?;

    println!(
        "\n{} todos ({} complete), {} mutations, selection resolves: {}",
        state.len(),
        state.completed_count(),
        state.counter,
        state.selected().is_some()
    );

    Ok(())
}
