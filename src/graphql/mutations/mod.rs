use async_graphql::*;
use tracing::info;

use crate::domain::UpdateDataSourceParams;
use crate::graphql::context::{request_credentials, GraphQLContext};
use crate::graphql::errors::StructuredError;
use crate::graphql::types::{DataSourceInterface, UpdateDataSourceInput};

#[derive(Default)]
pub struct DataSourceMutation;

#[Object]
impl DataSourceMutation {
    /// Update a data source and return the stored record
    async fn update_data_source(
        &self,
        ctx: &Context<'_>,
        data_source_id: ID,
        params: UpdateDataSourceInput,
    ) -> Result<Option<DataSourceInterface>> {
        let context = ctx.data::<GraphQLContext>()?;
        let params = UpdateDataSourceParams::try_from(params)?;
        info!("Forwarding update of data source {}", data_source_id.as_str());

        let record = context
            .rest
            .update_data_source(&request_credentials(ctx), &data_source_id, &params)
            .await
            .map_err(StructuredError::from_core_error)?;

        DataSourceInterface::try_from(record)
            .map(Some)
            .map_err(StructuredError::from_core_error)
    }
}

#[derive(Default)]
pub struct SlackMutation;

#[Object]
impl SlackMutation {
    /// Link the current user to the Slack account that issued `secret`
    async fn connect(&self, ctx: &Context<'_>, secret: String) -> Result<bool> {
        let context = ctx.data::<GraphQLContext>()?;

        context
            .slacker
            .connect_slack_user(&request_credentials(ctx), &secret)
            .await
            .map_err(StructuredError::from_core_error)?;
        Ok(true)
    }
}

#[derive(Default, MergedObject)]
pub struct Mutation(DataSourceMutation, SlackMutation);
