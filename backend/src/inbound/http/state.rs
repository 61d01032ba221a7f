//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be tested against mocks without I/O.

use std::sync::Arc;

use crate::domain::ActionPolicy;
use crate::domain::ports::{BotRegistryCommand, BotRegistryQuery};

/// Dependency bundle for registry handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and blacklist writes.
    pub command: Arc<dyn BotRegistryCommand>,
    /// Checks and listing.
    pub query: Arc<dyn BotRegistryQuery>,
    /// Parsing of the blacklist `action` field.
    pub action_policy: ActionPolicy,
}

impl HttpState {
    /// Bundle the ports with the lenient action policy.
    pub fn new(command: Arc<dyn BotRegistryCommand>, query: Arc<dyn BotRegistryQuery>) -> Self {
        Self {
            command,
            query,
            action_policy: ActionPolicy::default(),
        }
    }

    /// Replace the blacklist action policy.
    #[must_use]
    pub fn with_action_policy(mut self, action_policy: ActionPolicy) -> Self {
        self.action_policy = action_policy;
        self
    }
}
