use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::{FormatAsset, GeneratedAsset};

/// Asset category within a kit, in stage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetCategory {
    Poster,
    SocialMedia,
    Mockup,
    CustomerAd,
    Multilingual,
    Render,
    QrCode,
}

impl AssetCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Poster => "poster",
            AssetCategory::SocialMedia => "social-media",
            AssetCategory::Mockup => "mockup",
            AssetCategory::CustomerAd => "customer-ad",
            AssetCategory::Multilingual => "multilingual",
            AssetCategory::Render => "render",
            AssetCategory::QrCode => "qr-code",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything produced by one submission.
///
/// A kit is built from empty, filled one category at a time in stage order,
/// and replaced as a whole by the next submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingKit {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub posters: Vec<GeneratedAsset>,
    pub social_media: Vec<FormatAsset>,
    pub mockups: Vec<GeneratedAsset>,
    pub customer_ads: Vec<GeneratedAsset>,
    pub multilingual_versions: Vec<GeneratedAsset>,
    pub renders: Vec<GeneratedAsset>,
    pub qr_code: Option<GeneratedAsset>,
}

impl Default for MarketingKit {
    fn default() -> Self {
        Self::empty()
    }
}

/// A borrowed view of one asset with its category, used for listing and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitEntry<'a> {
    pub category: AssetCategory,
    pub index: usize,
    pub image: &'a str,
    pub title: Option<&'a str>,
}

impl MarketingKit {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            posters: Vec::new(),
            social_media: Vec::new(),
            mockups: Vec::new(),
            customer_ads: Vec::new(),
            multilingual_versions: Vec::new(),
            renders: Vec::new(),
            qr_code: None,
        }
    }

    /// The poster every "reuse the poster" stage derives from.
    pub fn first_poster(&self) -> Option<&GeneratedAsset> {
        self.posters.first()
    }

    pub fn asset_count(&self) -> usize {
        self.posters.len()
            + self.social_media.len()
            + self.mockups.len()
            + self.customer_ads.len()
            + self.multilingual_versions.len()
            + self.renders.len()
            + usize::from(self.qr_code.is_some())
    }

    /// All assets in stage order.
    pub fn entries(&self) -> Vec<KitEntry<'_>> {
        let mut entries = Vec::with_capacity(self.asset_count());
        push_assets(&mut entries, AssetCategory::Poster, &self.posters);
        for (index, asset) in self.social_media.iter().enumerate() {
            entries.push(KitEntry {
                category: AssetCategory::SocialMedia,
                index,
                image: asset.image.as_str(),
                title: Some(asset.format.as_str()),
            });
        }
        push_assets(&mut entries, AssetCategory::Mockup, &self.mockups);
        push_assets(&mut entries, AssetCategory::CustomerAd, &self.customer_ads);
        push_assets(&mut entries, AssetCategory::Multilingual, &self.multilingual_versions);
        push_assets(&mut entries, AssetCategory::Render, &self.renders);
        if let Some(qr) = &self.qr_code {
            push_assets(&mut entries, AssetCategory::QrCode, std::slice::from_ref(qr));
        }
        entries
    }
}

fn push_assets<'a>(
    entries: &mut Vec<KitEntry<'a>>,
    category: AssetCategory,
    assets: &'a [GeneratedAsset],
) {
    for (index, asset) in assets.iter().enumerate() {
        entries.push(KitEntry {
            category,
            index,
            image: asset.image.as_str(),
            title: asset.title.as_deref(),
        });
    }
}
