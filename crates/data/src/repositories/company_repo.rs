//! Company reads, curation mutations, and edit suggestions.

use tastelog_core::types::DbId;
use tastelog_core::Result;
use tastelog_postgrest::Client;

use crate::models::company::{
    self, Company, CompanyDetailed, CompanySummary, NewCompany, NewEditSuggestion, Shape,
    SummaryParams, UpdateCompany, VerifyParams,
};

const FNC_VERIFY_COMPANY: &str = "fnc__verify_company";
const FNC_GET_COMPANY_SUMMARY: &str = "fnc__get_company_summary";

pub struct CompanyRepo;

impl CompanyRepo {
    pub async fn get_by_id(client: &Client, id: DbId) -> Result<Company> {
        client
            .from(company::TABLE)
            .select(company::query(Shape::Saved, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn get_detailed(client: &Client, id: DbId) -> Result<CompanyDetailed> {
        client
            .from(company::TABLE)
            .select(company::query(Shape::Detailed, false))
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn search(client: &Client, term: &str) -> Result<Vec<Company>> {
        client
            .from(company::TABLE)
            .select(company::query(Shape::Saved, false))
            .ilike("name", format!("%{term}%"))
            .fetch_all()
            .await
    }

    pub async fn insert(client: &Client, new_company: &NewCompany) -> Result<Company> {
        client
            .from(company::TABLE)
            .insert(new_company)
            .select(company::query(Shape::Saved, false))
            .fetch_one()
            .await
    }

    pub async fn update_name(client: &Client, id: DbId, name: &str) -> Result<Company> {
        client
            .from(company::TABLE)
            .update(&UpdateCompany { name: name.into() })
            .eq("id", id)
            .select(company::query(Shape::Saved, false))
            .fetch_one()
            .await
    }

    pub async fn verify(client: &Client, id: DbId, is_verified: bool) -> Result<()> {
        client
            .rpc(
                FNC_VERIFY_COMPANY,
                &VerifyParams {
                    company_id: id,
                    is_verified,
                },
            )
            .execute()
            .await
    }

    pub async fn delete(client: &Client, id: DbId) -> Result<()> {
        client
            .from(company::TABLE)
            .delete()
            .eq("id", id)
            .execute()
            .await
    }

    pub async fn get_unverified(client: &Client) -> Result<Vec<Company>> {
        client
            .from(company::TABLE)
            .select(company::query(Shape::Saved, false))
            .eq("is_verified", false)
            .order("created_at", false)
            .fetch_all()
            .await
    }

    pub async fn get_summary(client: &Client, id: DbId) -> Result<CompanySummary> {
        client
            .rpc(FNC_GET_COMPANY_SUMMARY, &SummaryParams { company_id: id })
            .fetch_one()
            .await
    }

    pub async fn create_edit_suggestion(
        client: &Client,
        suggestion: &NewEditSuggestion,
    ) -> Result<()> {
        client
            .from(company::EDIT_SUGGESTIONS_TABLE)
            .insert(suggestion)
            .execute()
            .await
    }
}
