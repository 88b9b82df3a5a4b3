mod account_connection;
mod device;
mod event;
mod shared;
mod task;
mod workspace;

pub use account_connection::IAccountConnectionRepo;
use account_connection::InMemoryAccountConnectionRepo;
pub use device::IDeviceRepo;
use device::InMemoryDeviceRepo;
pub use event::IEventRepo;
use event::InMemoryEventRepo;
pub use task::ITaskRepo;
use task::InMemoryTaskRepo;
pub use workspace::IWorkspaceRepo;
use workspace::InMemoryWorkspaceRepo;

use std::sync::Arc;

/// The store contracts the reminder and sync jobs depend on. The
/// application persists tasks and events in its relational database; the
/// jobs only ever touch these narrow interfaces, and tests run against
/// the in-memory implementations.
#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub events: Arc<dyn IEventRepo>,
    pub workspaces: Arc<dyn IWorkspaceRepo>,
    pub connections: Arc<dyn IAccountConnectionRepo>,
    pub devices: Arc<dyn IDeviceRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new()),
            events: Arc::new(InMemoryEventRepo::new()),
            workspaces: Arc::new(InMemoryWorkspaceRepo::new()),
            connections: Arc::new(InMemoryAccountConnectionRepo::new()),
            devices: Arc::new(InMemoryDeviceRepo::new()),
        }
    }
}
