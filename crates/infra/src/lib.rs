mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, GoogleOAuthConfig};
pub use repos::Repos;
pub use repos::{
    IAccountConnectionRepo, IDeviceRepo, IEventRepo, ITaskRepo, IWorkspaceRepo,
};
pub use services::*;
use std::sync::Arc;
pub use system::{FixedTimeSys, ISys};
use system::RealSys;

/// Everything the background jobs need to do their work: the repositories,
/// the configuration, the clock and the push transport. Passed explicitly
/// into every use case so that there is no process-wide mutable state.
#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: Arc<dyn IPushTransport>,
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> Context {
    let config = Config::new();
    let push = Arc::new(HttpPushGateway::new(&config.push_gateway_url));
    Context {
        repos: Repos::create_inmemory(),
        config,
        sys: Arc::new(RealSys {}),
        push,
    }
}
