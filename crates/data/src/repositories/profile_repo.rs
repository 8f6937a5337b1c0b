//! Profile reads, account mutations, and statistics RPCs.

use tastelog_core::types::{DbId, ProfileId};
use tastelog_core::Result;
use tastelog_postgrest::{storage, Bucket, Client};
use uuid::Uuid;

use crate::models::profile::{
    self, CategoryStatistics, CategoryStatsParams, CheckInsPerDay, CheckInsPerDayParams,
    Contributions, Profile, ProfileDetailed, ProfileExtended, ProfileSettings, ProfileSummary,
    Shape, StatisticsTimePeriod, SubcategoryStatistics, SubcategoryStatsParams, SummaryParams,
    TimePeriodStatistic, TimePeriodStatsParams, TopLocation, TopLocationsParams, UpdateProfile,
    UpdateProfileSettings, UsernameParams,
};
use crate::models::image_entity::ImageEntity;
use crate::repositories::auth_repo::AuthRepo;
use crate::repositories::image_entity_repo::ImageEntityRepo;

const FNC_GET_PROFILE_SUMMARY: &str = "fnc__get_profile_summary";
const FNC_GET_CATEGORY_STATS: &str = "fnc__get_category_stats";
const FNC_GET_SUBCATEGORY_STATS: &str = "fnc__get_subcategory_stats";
const FNC_GET_TIME_PERIOD_STATS: &str = "fnc__get_time_period_statistics";
const FNC_GET_CHECK_INS_PER_DAY: &str = "fnc__get_number_of_check_ins_by_day";
const FNC_GET_TOP_LOCATIONS: &str = "fnc__get_number_of_check_ins_by_location";
const FNC_CHECK_USERNAME: &str = "fnc__check_if_username_is_available";
const FNC_EXPORT_DATA: &str = "fnc__export_data";
const FNC_DELETE_CURRENT_USER: &str = "fnc__delete_current_user";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn get_by_id(client: &Client, id: ProfileId) -> Result<Profile> {
        client
            .from(profile::TABLE)
            .select(profile::query(Shape::Minimal, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_detailed(client: &Client, id: ProfileId) -> Result<ProfileDetailed> {
        client
            .from(profile::TABLE)
            .select(profile::query(Shape::Detailed, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    /// The signed-in user's own profile, resolved through the session.
    pub async fn get_current_user(client: &Client) -> Result<ProfileExtended> {
        let user = AuthRepo::user(client).await?;
        client
            .from(profile::TABLE)
            .select(profile::query(Shape::Extended, false))
            .eq("id", user.id)
            .fetch_one()
            .await
    }

    pub async fn update(
        client: &Client,
        id: ProfileId,
        update: &UpdateProfile,
    ) -> Result<ProfileExtended> {
        client
            .from(profile::TABLE)
            .update(update)
            .eq("id", id)
            .select(profile::query(Shape::Extended, false))
            .fetch_one()
            .await
    }

    pub async fn update_settings(
        client: &Client,
        id: ProfileId,
        update: &UpdateProfileSettings,
    ) -> Result<ProfileSettings> {
        client
            .from(profile::SETTINGS_TABLE)
            .update(update)
            .eq("id", id)
            .select(profile::settings_query(false))
            .fetch_one()
            .await
    }

    /// Name search across username and both name columns. The wildcard `*`
    /// is the backend's pattern character inside `or` expressions.
    pub async fn search(
        client: &Client,
        term: &str,
        exclude: Option<ProfileId>,
    ) -> Result<Vec<Profile>> {
        let pattern = format!(
            "username.ilike.*{term}*,first_name.ilike.*{term}*,last_name.ilike.*{term}*"
        );
        let mut builder = client
            .from(profile::TABLE)
            .select(profile::query(Shape::Minimal, false))
            .or(pattern);
        if let Some(id) = exclude {
            builder = builder.neq("id", id);
        }
        builder.fetch_all().await
    }

    pub async fn is_username_available(client: &Client, username: &str) -> Result<bool> {
        client
            .rpc(FNC_CHECK_USERNAME, &UsernameParams { username })
            .fetch_scalar()
            .await
    }

    pub async fn get_contributions(client: &Client, id: ProfileId) -> Result<Contributions> {
        client
            .from(profile::TABLE)
            .select(profile::contributions_query(false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    // ---- statistics ----

    pub async fn get_summary(client: &Client, id: ProfileId) -> Result<ProfileSummary> {
        client
            .rpc(FNC_GET_PROFILE_SUMMARY, &SummaryParams { profile_id: id })
            .fetch_one()
            .await
    }

    pub async fn get_category_statistics(
        client: &Client,
        id: ProfileId,
    ) -> Result<Vec<CategoryStatistics>> {
        client
            .rpc(FNC_GET_CATEGORY_STATS, &CategoryStatsParams { profile_id: id })
            .fetch_all()
            .await
    }

    pub async fn get_subcategory_statistics(
        client: &Client,
        id: ProfileId,
        category_id: DbId,
    ) -> Result<Vec<SubcategoryStatistics>> {
        client
            .rpc(
                FNC_GET_SUBCATEGORY_STATS,
                &SubcategoryStatsParams {
                    profile_id: id,
                    category_id,
                },
            )
            .fetch_all()
            .await
    }

    pub async fn get_time_period_statistics(
        client: &Client,
        id: ProfileId,
        time_period: StatisticsTimePeriod,
    ) -> Result<TimePeriodStatistic> {
        client
            .rpc(
                FNC_GET_TIME_PERIOD_STATS,
                &TimePeriodStatsParams {
                    profile_id: id,
                    time_period,
                },
            )
            .fetch_one()
            .await
    }

    pub async fn get_check_ins_per_day(
        client: &Client,
        id: ProfileId,
    ) -> Result<Vec<CheckInsPerDay>> {
        client
            .rpc(FNC_GET_CHECK_INS_PER_DAY, &CheckInsPerDayParams { profile_id: id })
            .fetch_all()
            .await
    }

    pub async fn get_top_locations(client: &Client, id: ProfileId) -> Result<Vec<TopLocation>> {
        client
            .rpc(FNC_GET_TOP_LOCATIONS, &TopLocationsParams { profile_id: id })
            .fetch_all()
            .await
    }

    // ---- account ----

    /// Upload a new avatar and read back the image row the backend linked
    /// to the profile from the object path.
    pub async fn upload_avatar(
        client: &Client,
        id: ProfileId,
        data: Vec<u8>,
    ) -> Result<ImageEntity> {
        let file_name = format!("{}.jpeg", Uuid::new_v4());
        let path = storage::object_path(id, &file_name);
        client
            .storage()
            .upload(Bucket::ProfileAvatars, &path, data)
            .await?;
        ImageEntityRepo::get_by_file(client, Bucket::ProfileAvatars, &file_name).await
    }

    /// Whole-account export as CSV.
    pub async fn export_data(client: &Client) -> Result<String> {
        client
            .rpc(FNC_EXPORT_DATA, &serde_json::json!({}))
            .csv()
            .fetch_text()
            .await
    }

    pub async fn delete_current_account(client: &Client) -> Result<()> {
        client
            .rpc(FNC_DELETE_CURRENT_USER, &serde_json::json!({}))
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
    async fn username_check_decodes_the_bare_scalar() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let server = tokio::spawn(serve(listener, vec!["true".into()]));

        let available = ProfileRepo::is_username_available(&client, "talvi")
            .await
            .unwrap();
        assert!(available);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /rest/v1/rpc/fnc__check_if_username_is_available"));
        // Scalar RPCs serve a plain JSON value, not a single object.
        assert!(!requests[0].contains("vnd.pgrst.object"));
    }

    #[tokio::test]
    async fn export_asks_for_the_csv_rendition() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let csv = "id,rating\n1001,8\n";
        let server = tokio::spawn(serve(listener, vec![csv.into()]));

        let exported = ProfileRepo::export_data(&client).await.unwrap();
        assert_eq!(exported, csv);

        let requests = server.await.unwrap();
        assert!(requests[0].to_lowercase().contains("accept: text/csv"));
    }

    #[tokio::test]
    async fn avatar_upload_reads_the_stored_row_back() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let client = local_client(listener.local_addr().unwrap());
        let image_row = serde_json::json!({ "id": 12, "file": "pic.jpeg" }).to_string();
        let server = tokio::spawn(serve(listener, vec![String::new(), image_row]));

        let image = ProfileRepo::upload_avatar(&client, Uuid::nil(), vec![0xFF, 0xD8])
            .await
            .unwrap();
        assert_eq!(image.id, 12);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with(
            "POST /storage/v1/object/profile-avatars/00000000-0000-0000-0000-000000000000/"
        ));
        assert!(requests[1].starts_with("GET /rest/v1/profile_avatars?"));
        assert!(requests[1].contains("file=eq."));
    }
}
