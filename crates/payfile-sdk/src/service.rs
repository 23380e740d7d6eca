use std::sync::Arc;

use payfile_ledger::InMemoryEventStore;
use payfile_types::DomainEvent;

use crate::commands::Command;
use crate::error::SdkResult;
use crate::handlers::CommandHandlers;
use crate::queries::QueryHandlers;

/// One event store with its command and query handlers.
///
/// Constructed once by the application's composition root and cloned into
/// every request handler; all clones share the same store.
#[derive(Clone)]
pub struct PaymentFiles {
    store: Arc<InMemoryEventStore>,
    commands: CommandHandlers,
    queries: QueryHandlers,
}

impl PaymentFiles {
    /// A service over a fresh, empty store.
    pub fn new() -> Self {
        Self::with_store(InMemoryEventStore::shared())
    }

    /// A service over an existing store.
    pub fn with_store(store: Arc<InMemoryEventStore>) -> Self {
        Self {
            commands: CommandHandlers::new(store.clone()),
            queries: QueryHandlers::new(store.clone()),
            store,
        }
    }

    pub fn commands(&self) -> &CommandHandlers {
        &self.commands
    }

    pub fn queries(&self) -> &QueryHandlers {
        &self.queries
    }

    pub fn store(&self) -> &Arc<InMemoryEventStore> {
        &self.store
    }

    pub fn execute(&self, command: Command) -> SdkResult<DomainEvent> {
        self.commands.execute(command)
    }

    /// Execute commands in order, returning the stored events.
    ///
    /// Stops at the first failure; events appended before it stay recorded.
    pub fn execute_all(&self, commands: impl IntoIterator<Item = Command>) -> SdkResult<Vec<DomainEvent>> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }
}

impl Default for PaymentFiles {
    fn default() -> Self {
        Self::new()
    }
}
