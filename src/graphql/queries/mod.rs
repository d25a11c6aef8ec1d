use async_graphql::*;
use tracing::debug;

use crate::domain::{DataSourceRequestParams, Event, EventsRequestParams};
use crate::graphql::context::{request_credentials, GraphQLContext};
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{DataSourceInterface, DataSourceRequestParamsInput, EventsRequestParamsInput};

#[derive(Default)]
pub struct DataSourceQuery;

#[Object]
impl DataSourceQuery {
    /// Get a data source by ID, resolved to its provider-specific type
    async fn data_source(
        &self,
        ctx: &Context<'_>,
        data_source_id: ID,
        request_params: Option<DataSourceRequestParamsInput>,
    ) -> Result<Option<DataSourceInterface>> {
        let context = ctx.data::<GraphQLContext>()?;
        let params: DataSourceRequestParams = request_params.unwrap_or_default().into();
        debug!("Fetching data source {}", data_source_id.as_str());

        let record = context
            .rest
            .get_data_source(&request_credentials(ctx), &data_source_id, &params)
            .await
            .map_err(StructuredError::from_core_error)?;

        DataSourceInterface::try_from(record)
            .map(Some)
            .map_err(StructuredError::from_core_error)
    }
}

#[derive(Default)]
pub struct EventsQuery;

#[Object]
impl EventsQuery {
    /// Organization events, newest first
    async fn events(
        &self,
        ctx: &Context<'_>,
        organization_id: ID,
        request_params: Option<EventsRequestParamsInput>,
    ) -> Result<Vec<Event>> {
        let context = ctx.data::<GraphQLContext>()?;
        let params: EventsRequestParams = request_params.unwrap_or_default().into();

        context
            .keeper
            .get_events(&request_credentials(ctx), &organization_id, &params)
            .await
            .map_err(StructuredError::from_core_error)
    }
}

#[derive(Default)]
pub struct SlackQuery;

#[Object]
impl SlackQuery {
    /// Slack app installation URL
    async fn url(&self, ctx: &Context<'_>) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;

        context
            .slacker
            .get_install_path(&request_credentials(ctx))
            .await
            .map_err(StructuredError::from_core_error)
    }
}

#[derive(Default, MergedObject)]
pub struct Query(DataSourceQuery, EventsQuery, SlackQuery);
