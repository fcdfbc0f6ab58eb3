use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::ListingId;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListingsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureQuery {
    #[serde(default = "default_featured")]
    pub featured: bool,
}

fn default_featured() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub id: ListingId,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedChange {
    pub id: ListingId,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub listings: BTreeMap<String, i64>,
    pub total_listings: i64,
    pub users: BTreeMap<String, i64>,
    pub total_users: i64,
    pub total_inquiries: i64,
}

impl PlatformStats {
    pub fn from_counts(
        listing_counts: Vec<(String, i64)>,
        user_counts: Vec<(String, i64)>,
        total_inquiries: i64,
    ) -> Self {
        let listings: BTreeMap<String, i64> = listing_counts.into_iter().collect();
        let users: BTreeMap<String, i64> = user_counts.into_iter().collect();
        Self {
            total_listings: listings.values().sum(),
            total_users: users.values().sum(),
            listings,
            users,
            total_inquiries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_totals() {
        let stats = PlatformStats::from_counts(
            vec![("draft".into(), 2), ("published".into(), 3)],
            vec![("buyer".into(), 4), ("creator".into(), 1)],
            7,
        );
        assert_eq!(stats.total_listings, 5);
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.listings.get("published"), Some(&3));
        assert_eq!(stats.total_inquiries, 7);
    }
}
