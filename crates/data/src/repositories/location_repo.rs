//! Locations. Creation goes through a get-or-create RPC so repeated
//! check-ins at one venue share a row.

use tastelog_core::types::LocationId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::location::{
    self, Location, LocationSummary, NewLocationParams, Shape, SuggestionParams, SummaryParams,
};

const FNC_INSERT_LOCATION: &str = "fnc__get_location_insert_if_not_exist";
const FNC_GET_LOCATION_SUMMARY: &str = "fnc__get_location_summary";
const FNC_GET_LOCATION_SUGGESTIONS: &str = "fnc__get_location_suggestions";

pub struct LocationRepo;

impl LocationRepo {
    pub async fn insert(client: &Client, params: &NewLocationParams) -> Result<Location> {
        client
            .rpc(FNC_INSERT_LOCATION, params)
            .select(location::query(Shape::Joined, false))
            .fetch_one()
            .await
    }

    pub async fn get_by_id(client: &Client, id: LocationId) -> Result<Location> {
        client
            .from(location::TABLE)
            .select(location::query(Shape::Joined, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn search(client: &Client, term: &str) -> Result<Vec<Location>> {
        client
            .from(location::TABLE)
            .select(location::query(Shape::Joined, false))
            .ilike("name", format!("%{term}%"))
            .fetch_all()
            .await
    }

    /// Locations the current user checked in at most recently.
    pub async fn get_recent(client: &Client) -> Result<Vec<Location>> {
        client
            .from(location::RECENT_VIEW)
            .select(location::query(Shape::Joined, false))
            .fetch_all()
            .await
    }

    /// Nearby suggestions for the check-in form.
    pub async fn get_suggestions(
        client: &Client,
        params: &SuggestionParams,
    ) -> Result<Vec<Location>> {
        client
            .rpc(FNC_GET_LOCATION_SUGGESTIONS, params)
            .select(location::query(Shape::Joined, false))
            .fetch_all()
            .await
    }

    pub async fn delete(client: &Client, id: LocationId) -> Result<()> {
        client
            .from(location::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn get_summary(client: &Client, id: LocationId) -> Result<LocationSummary> {
        client
            .rpc(FNC_GET_LOCATION_SUMMARY, &SummaryParams { location_id: id })
            .fetch_one()
            .await
    }
}
