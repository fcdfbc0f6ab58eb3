use serde::Deserialize;

/// Body of `POST /api/listings`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub tagline: Option<String>,
    pub description: String,
    pub genre: String,
    pub format: String,
    pub tier: Option<String>,

    pub period: Option<String>,
    pub location: Option<String>,
    pub world_type: Option<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    pub target_audience: Option<String>,

    #[serde(default)]
    pub comparables: Vec<String>,
    pub logline: Option<String>,

    pub rights_holder: Option<String>,
    pub rights_holder_contact: Option<String>,
    #[serde(default)]
    pub available_rights: Vec<String>,
    #[serde(default)]
    pub available_territories: Vec<String>,
}

/// Body of `PUT /api/listings/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub format: Option<String>,
    pub tier: Option<String>,
    pub period: Option<String>,
    pub location: Option<String>,
    pub world_type: Option<String>,
    pub themes: Option<Vec<String>>,
    pub target_audience: Option<String>,
    pub comparables: Option<Vec<String>>,
    pub logline: Option<String>,
    pub rights_holder: Option<String>,
    pub rights_holder_contact: Option<String>,
    pub available_rights: Option<Vec<String>>,
    pub available_territories: Option<Vec<String>>,
    pub status: Option<String>,
}

impl UpdateListingRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.tagline.is_none()
            && self.description.is_none()
            && self.genre.is_none()
            && self.format.is_none()
            && self.tier.is_none()
            && self.period.is_none()
            && self.location.is_none()
            && self.world_type.is_none()
            && self.themes.is_none()
            && self.target_audience.is_none()
            && self.comparables.is_none()
            && self.logline.is_none()
            && self.rights_holder.is_none()
            && self.rights_holder_contact.is_none()
            && self.available_rights.is_none()
            && self.available_territories.is_none()
            && self.status.is_none()
    }
}

/// Query string of `GET /api/listings`
///
/// Enumerated values stay strings here so bad input becomes a 422 with a
/// readable message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListListingsQuery {
    pub genre: Option<String>,
    pub tier: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}
