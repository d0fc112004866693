use crate::common::error::{AppError, ServiceResult};
use crate::models::tracker::MatchTracker;
use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::LazyLock;
use tracing::warn;

pub type CommandRouterInstance = LazyLock<CommandRouter>;

pub struct RegisteredCommand {
    pub name: &'static str,
    handler: Box<dyn CommandHandlerProxy>,
}

pub struct CommandRouter {
    commands: HashMap<&'static str, RegisteredCommand>,
}

/// A tracker command. Implemented through the `#[command("name")]`
/// attribute; `Args` is decoded from the request body before `handle` runs.
pub trait TrackerCommand<Args: DeserializeOwned>: 'static + Send + Sync {
    const NAME: &'static str;
    fn handle(tracker: &mut MatchTracker, args: Args) -> ServiceResult<()>;
}

#[macro_export]
macro_rules! commands {
    ($($h:path),* $(,)?) => {
        std::sync::LazyLock::new(|| {
            use $crate::commands::CommandRouter;
            const CMDS: &[&str] = &[$(stringify!($h)),*];
            #[allow(unused_mut)]
            let mut router = CommandRouter::with_capacity(CMDS.len());
            $(router.register($h);)*
            router
        })
    };
}

impl CommandRouter {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, cmd_name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(cmd_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn register<Args: 'static + DeserializeOwned, C: TrackerCommand<Args>>(&mut self, cmd: C) {
        self.commands.insert(C::NAME, RegisteredCommand::new(cmd));
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisteredCommand {
    pub fn new<Args: 'static + DeserializeOwned, C: TrackerCommand<Args>>(cmd: C) -> Self {
        Self {
            name: C::NAME,
            handler: Box::new(Proxy::new(cmd)),
        }
    }

    pub fn handle(&self, tracker: &mut MatchTracker, payload: &Value) -> ServiceResult<()> {
        self.handler.handle(tracker, payload)
    }
}

trait CommandHandlerProxy: Send + Sync {
    fn handle(&self, tracker: &mut MatchTracker, payload: &Value) -> ServiceResult<()>;
}

impl<Args: DeserializeOwned, T: TrackerCommand<Args>> CommandHandlerProxy for Proxy<Args, T> {
    fn handle(&self, tracker: &mut MatchTracker, payload: &Value) -> ServiceResult<()> {
        let args = <Args as serde::Deserialize<'_>>::deserialize(payload).map_err(|e| {
            warn!(command = T::NAME, "Invalid command payload: {e}");
            AppError::InvalidPayload
        })?;
        T::handle(tracker, args)
    }
}

struct Proxy<Args: DeserializeOwned, H: TrackerCommand<Args>>(H, PhantomData<fn() -> Args>);

impl<Args: DeserializeOwned, H: TrackerCommand<Args>> Proxy<Args, H> {
    pub fn new(handler: H) -> Self {
        Self(handler, PhantomData)
    }
}
