//! Content reports.

use tastelog_core::pagination::PageRange;
use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::report::{self, NewReport, Report};

pub struct ReportRepo;

impl ReportRepo {
    pub async fn insert(client: &Client, report: &NewReport) -> Result<()> {
        client.from(report::TABLE).insert(report).execute().await
    }

    /// Unresolved reports, oldest first, for the moderation queue.
    pub async fn get_all(client: &Client, range: PageRange) -> Result<Vec<Report>> {
        client
            .from(report::TABLE)
            .select(report::query(false))
            .is_null("resolved_at")
            .order("created_at", true)
            .range(range.from, range.to)
            .fetch_all()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(report::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }
}
