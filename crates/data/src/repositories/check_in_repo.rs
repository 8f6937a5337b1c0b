//! Check-in reads, mutations, and image handling.

use chrono::Utc;
use tastelog_core::blurhash::BlurHash;
use tastelog_core::pagination::PageRange;
use tastelog_core::types::{DbId, LocationId, ProfileId};
use tastelog_core::Result;
use tastelog_postgrest::{storage, Bucket, Client};

use crate::models::check_in::{
    self, ActivityFeedQuery, CheckIn, CheckInImage, CheckInReaction, DeleteAsModeratorParams,
    ImageQuery, NewCheckInParams, NewReaction, ProfileCheckInQuery, Segment, Shape,
    UpdateBlurHashParams, UpdateCheckInParams,
};
use crate::models::image_entity::{self, ImageEntity};
use crate::models::profile::{ProfileSummary, SummaryParams};
use crate::repositories::image_entity_repo::ImageEntityRepo;

const FNC_CREATE_CHECK_IN: &str = "fnc__create_check_in";
const FNC_UPDATE_CHECK_IN: &str = "fnc__update_check_in";
const FNC_DELETE_CHECK_IN_AS_MODERATOR: &str = "fnc__delete_check_in_as_moderator";
const FNC_GET_PROFILE_SUMMARY: &str = "fnc__get_profile_summary";
const FNC_UPDATE_CHECK_IN_IMAGE_BLUR_HASH: &str = "fnc__update_check_in_image_blur_hash";

pub struct CheckInRepo;

impl CheckInRepo {
    pub async fn get_activity_feed(
        client: &Client,
        query: ActivityFeedQuery,
    ) -> Result<Vec<CheckIn>> {
        let builder = client
            .from(check_in::ACTIVITY_FEED_VIEW)
            .select(check_in::query(Shape::Joined, false))
            .order("check_in_at", false);
        match query {
            ActivityFeedQuery::Paginated(range) => {
                builder.range(range.from, range.to).fetch_all().await
            }
            ActivityFeedQuery::AfterId(id) => builder.gt("id", id).fetch_all().await,
        }
    }

    pub async fn get_by_id(client: &Client, id: DbId) -> Result<CheckIn> {
        client
            .from(check_in::TABLE)
            .select(check_in::query(Shape::Joined, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_by_profile_id(
        client: &Client,
        profile_id: ProfileId,
        query: ProfileCheckInQuery,
    ) -> Result<Vec<CheckIn>> {
        // check_in_at is user-settable (backdated check-ins), so id order
        // and check-in-time order genuinely differ.
        let builder = client
            .from(check_in::TABLE)
            .select(check_in::query(Shape::Joined, false))
            .eq("created_by", profile_id)
            .order("check_in_at", false);
        match query {
            ProfileCheckInQuery::Paginated(range) => {
                builder.range(range.from, range.to).fetch_all().await
            }
            ProfileCheckInQuery::DateRange { range, start, end } => {
                builder
                    .gte("check_in_at", check_in::wire_timestamp(start))
                    .lte("check_in_at", check_in::wire_timestamp(end))
                    .range(range.from, range.to)
                    .fetch_all()
                    .await
            }
            ProfileCheckInQuery::Location { range, location_id } => {
                builder
                    .eq("location_id", location_id)
                    .range(range.from, range.to)
                    .fetch_all()
                    .await
            }
        }
    }

    /// Check-ins of a product, restricted to `segment`. All segments share
    /// one selection; the relation changes.
    pub async fn get_by_product_id(
        client: &Client,
        product_id: DbId,
        segment: Segment,
        range: PageRange,
    ) -> Result<Vec<CheckIn>> {
        client
            .from(segment.relation())
            .select(check_in::query(Shape::Joined, false))
            .eq("product_id", product_id)
            .order("created_at", false)
            .range(range.from, range.to)
            .fetch_all()
            .await
    }

    pub async fn get_by_location(
        client: &Client,
        location_id: LocationId,
        segment: Segment,
        range: PageRange,
    ) -> Result<Vec<CheckIn>> {
        client
            .from(segment.relation())
            .select(check_in::query(Shape::Joined, false))
            .eq("location_id", location_id)
            .order("created_at", false)
            .range(range.from, range.to)
            .fetch_all()
            .await
    }

    pub async fn get_images(
        client: &Client,
        by: ImageQuery,
        range: PageRange,
    ) -> Result<Vec<CheckInImage>> {
        let mut selection = check_in::query(Shape::Image, false);
        if matches!(by, ImageQuery::Product(_)) {
            // The product filter reaches through the check-in row.
            selection.push_str(", check_ins!inner(product_id)");
        }
        let (column, value) = by.filter();
        client
            .from(check_in::IMAGES_VIEW)
            .select(selection)
            .eq(column, value)
            .order("created_at", false)
            .range(range.from, range.to)
            .fetch_all()
            .await
    }

    /// Create through the RPC and decode the stored row in the same joined
    /// shape every listing uses.
    pub async fn create(client: &Client, params: &NewCheckInParams) -> Result<CheckIn> {
        client
            .rpc(FNC_CREATE_CHECK_IN, params)
            .select(check_in::query(Shape::Joined, false))
            .fetch_one()
            .await
    }

    pub async fn update(client: &Client, params: &UpdateCheckInParams) -> Result<CheckIn> {
        client
            .rpc(FNC_UPDATE_CHECK_IN, params)
            .select(check_in::query(Shape::Joined, false))
            .fetch_one()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(check_in::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn delete_as_moderator(client: &Client, id: DbId) -> Result<()> {
        client
            .rpc(
                FNC_DELETE_CHECK_IN_AS_MODERATOR,
                &DeleteAsModeratorParams { check_in_id: id },
            )
            .execute()
            .await
    }

    /// Upload the image, then resolve the stored image row: with a blur
    /// hash the attach RPC returns it, otherwise it is read back by file
    /// name.
    pub async fn upload_image(
        client: &Client,
        check_in_id: DbId,
        created_by: ProfileId,
        data: Vec<u8>,
        blur_hash: Option<&BlurHash>,
    ) -> Result<ImageEntity> {
        let file_name = storage::check_in_file_name(check_in_id, Utc::now());
        let path = storage::object_path(created_by, &file_name);
        client
            .storage()
            .upload(Bucket::CheckInImages, &path, data)
            .await?;

        match blur_hash {
            Some(blur_hash) => {
                client
                    .rpc(
                        FNC_UPDATE_CHECK_IN_IMAGE_BLUR_HASH,
                        &UpdateBlurHashParams {
                            file: file_name,
                            blur_hash: blur_hash.to_string(),
                        },
                    )
                    .select(image_entity::query(Bucket::CheckInImages, false))
                    .fetch_one()
                    .await
            }
            None => ImageEntityRepo::get_by_file(client, Bucket::CheckInImages, &file_name).await,
        }
    }

    /// Rating histogram and totals for one profile's check-ins.
    pub async fn get_summary_by_profile_id(
        client: &Client,
        profile_id: ProfileId,
    ) -> Result<ProfileSummary> {
        client
            .rpc(FNC_GET_PROFILE_SUMMARY, &SummaryParams { profile_id })
            .fetch_one()
            .await
    }

    // ---- reactions ----

    pub async fn add_reaction(client: &Client, check_in_id: DbId) -> Result<CheckInReaction> {
        client
            .from(check_in::REACTIONS_TABLE)
            .insert(&NewReaction { check_in_id })
            .select(check_in::reaction_query(
                check_in::ReactionShape::JoinedProfile,
                false,
            ))
            .fetch_one()
            .await
    }

    pub async fn remove_reaction(client: &Client, reaction_id: DbId) -> Result<()> {
        client
            .from(check_in::REACTIONS_TABLE)
            .delete()
            .eq("id", reaction_id)
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;
    use uuid::Uuid;

    use super::*;
    use crate::repositories::test_support::{local_client, serve};

    #[tokio::test]
    async fn profile_listing_orders_by_check_in_time() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let server = tokio::spawn(serve(listener, vec!["[]".into()]));

        let rows = CheckInRepo::get_by_profile_id(
            &client,
            Uuid::nil(),
            ProfileCheckInQuery::Paginated(PageRange::first(10)),
        )
        .await
        .unwrap();
        assert!(rows.is_empty());

        let requests = server.await.unwrap();
        assert!(requests[0].contains("order=check_in_at.desc"));
        assert!(!requests[0].contains("order=id.desc"));
        assert!(requests[0].contains("created_by=eq.00000000-0000-0000-0000-000000000000"));
    }

    #[tokio::test]
    async fn image_upload_attaches_the_blur_hash_through_the_rpc() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let image_row =
            serde_json::json!({ "id": 7, "file": "1001_1700000000.jpeg" }).to_string();
        let server = tokio::spawn(serve(listener, vec![String::new(), image_row]));

        let blur_hash = BlurHash::new("L6PZfSjE.AyE_3t7t7R**0o#DgR4", 320.0, 240.0).unwrap();
        let image = CheckInRepo::upload_image(
            &client,
            1001,
            Uuid::nil(),
            vec![0xFF, 0xD8],
            Some(&blur_hash),
        )
        .await
        .unwrap();
        assert_eq!(image.id, 7);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with(
            "POST /storage/v1/object/check-in-images/00000000-0000-0000-0000-000000000000/1001_"
        ));
        assert!(requests[1]
            .starts_with("POST /rest/v1/rpc/fnc__update_check_in_image_blur_hash"));
        assert!(requests[1].contains("p_blur_hash"));
        assert!(requests[1].contains("320:240:::L6PZfSjE.AyE_3t7t7R**0o#DgR4"));
    }

    #[tokio::test]
    async fn image_upload_without_blur_hash_reads_the_row_back() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let image_row = serde_json::json!({ "id": 8, "file": "9_1.jpeg" }).to_string();
        let server = tokio::spawn(serve(listener, vec![String::new(), image_row]));

        let image =
            CheckInRepo::upload_image(&client, 9, Uuid::nil(), vec![0xFF], None)
                .await
                .unwrap();
        assert_eq!(image.id, 8);

        let requests = server.await.unwrap();
        assert!(requests[1].starts_with("GET /rest/v1/check_in_images?"));
        assert!(requests[1].contains("file=eq."));
    }
}
