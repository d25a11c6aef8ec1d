use std::sync::Arc;

use async_graphql::Context;

use crate::services::{Credentials, KeeperService, RestService, Services, SlackerService};

/// Collaborators the resolvers delegate to.
#[derive(Clone)]
pub struct GraphQLContext {
    pub rest: Arc<dyn RestService>,
    pub keeper: Arc<dyn KeeperService>,
    pub slacker: Arc<dyn SlackerService>,
}

impl GraphQLContext {
    pub fn new(
        rest: Arc<dyn RestService>,
        keeper: Arc<dyn KeeperService>,
        slacker: Arc<dyn SlackerService>,
    ) -> Self {
        Self {
            rest,
            keeper,
            slacker,
        }
    }

    pub fn from_services(services: &Services) -> Self {
        Self::new(
            Arc::clone(&services.rest),
            Arc::clone(&services.keeper),
            Arc::clone(&services.slacker),
        )
    }
}

/// Credentials attached to the current request, anonymous when absent.
pub fn request_credentials(ctx: &Context<'_>) -> Credentials {
    ctx.data_opt::<Credentials>().cloned().unwrap_or_default()
}
