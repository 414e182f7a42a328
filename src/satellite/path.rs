//! Path building for Satellite API resources
//!
//! Satellite exposes two API surfaces: the Foreman management API under
//! `/api/v2` and the Katello content-management API under `/katello/api/v2`.
//! Which one a resource kind lives on is fixed per kind.

/// API surface a resource collection is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    /// Foreman management API
    Management,
    /// Katello content-management API
    Content,
}

impl ApiSurface {
    pub const fn prefix(self) -> &'static str {
        match self {
            ApiSurface::Management => "/api/v2",
            ApiSurface::Content => "/katello/api/v2",
        }
    }
}

/// Collection path of a resource kind: surface prefix plus collection name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionPath {
    pub surface: ApiSurface,
    pub collection: &'static str,
}

impl CollectionPath {
    pub const fn new(surface: ApiSurface, collection: &'static str) -> Self {
        Self {
            surface,
            collection,
        }
    }

    /// e.g. `/api/v2/roles`
    pub fn collection(&self) -> String {
        format!("{}/{}", self.surface.prefix(), self.collection)
    }

    /// e.g. `/api/v2/roles/42`
    pub fn member(&self, id: u64) -> String {
        format!("{}/{}", self.collection(), id)
    }

    /// Collection path for `None`, member path otherwise
    pub fn build(&self, id: Option<u64>) -> String {
        match id {
            Some(id) => self.member(id),
            None => self.collection(),
        }
    }
}
