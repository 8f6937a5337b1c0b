//! Image bucket gateway.
//!
//! Buckets are public-read: uploads go through the authenticated object
//! endpoint, downloads are plain public URLs composed client-side. Objects
//! live under a per-owner folder named by the lowercased owner id.

use chrono::{DateTime, Utc};
use tastelog_core::Result;
use uuid::Uuid;

use crate::client::Client;

/// The fixed set of image buckets.
///
/// `id` is the storage bucket name, `relation` the table backing the image
/// rows (and therefore the embed key in entity selections).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    ProfileAvatars,
    CompanyLogos,
    BrandLogos,
    ProductLogos,
    CheckInImages,
}

impl Bucket {
    pub fn id(self) -> &'static str {
        match self {
            Bucket::ProfileAvatars => "profile-avatars",
            Bucket::CompanyLogos => "company-logos",
            Bucket::BrandLogos => "brand-logos",
            Bucket::ProductLogos => "product-logos",
            Bucket::CheckInImages => "check-in-images",
        }
    }

    pub fn relation(self) -> &'static str {
        match self {
            Bucket::ProfileAvatars => "profile_avatars",
            Bucket::CompanyLogos => "company_logos",
            Bucket::BrandLogos => "brand_logos",
            Bucket::ProductLogos => "product_logos",
            Bucket::CheckInImages => "check_in_images",
        }
    }
}

/// Object path inside a bucket: `{owner}/{file}`, owner id lowercased.
pub fn object_path(owner: Uuid, file_name: &str) -> String {
    format!("{}/{file_name}", owner.to_string().to_lowercase())
}

/// Deterministic file name for a check-in image, unique per capture second.
pub fn check_in_file_name(check_in_id: i64, at: DateTime<Utc>) -> String {
    format!("{check_in_id}_{}.jpeg", at.timestamp())
}

pub struct Storage<'c> {
    client: &'c Client,
}

impl<'c> Storage<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Upload a JPEG object. The path should come from [`object_path`].
    pub async fn upload(&self, bucket: Bucket, path: &str, data: Vec<u8>) -> Result<()> {
        let url = format!(
            "{}/storage/v1/object/{}/{path}",
            self.client.base_url,
            bucket.id()
        );
        let request = self
            .client
            .http
            .post(url)
            .header("Content-Type", "image/jpeg")
            .header("Cache-Control", "max-age=3600")
            .body(data);
        self.client.send(request).await?;
        Ok(())
    }

    /// Public download URL for an owner's object, `None` when the entity has
    /// no stored file.
    pub fn public_url(&self, bucket: Bucket, owner: Uuid, file_name: Option<&str>) -> Option<String> {
        let file_name = file_name?;
        Some(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url,
            bucket.id(),
            object_path(owner, file_name)
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn object_paths_lowercase_the_owner_folder() {
        let owner = Uuid::parse_str("A1B2C3D4-0000-0000-0000-00000000BEEF").unwrap();
        assert_eq!(
            object_path(owner, "42_1700000000.jpeg"),
            "a1b2c3d4-0000-0000-0000-00000000beef/42_1700000000.jpeg"
        );
    }

    #[test]
    fn check_in_file_names_embed_the_capture_second() {
        let at = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(check_in_file_name(42, at), "42_1700000000.jpeg");
    }

    #[test]
    fn public_urls_compose_from_the_base_url() {
        let client = Client::new(ClientConfig::new("https://example.test/", "anon"));
        let owner = Uuid::nil();
        let url = client
            .storage()
            .public_url(Bucket::ProfileAvatars, owner, Some("pic.jpeg"));
        assert_eq!(
            url.as_deref(),
            Some(concat!(
                "https://example.test/storage/v1/object/public/",
                "profile-avatars/00000000-0000-0000-0000-000000000000/pic.jpeg"
            ))
        );
        assert_eq!(client.storage().public_url(Bucket::ProfileAvatars, owner, None), None);
    }
}
