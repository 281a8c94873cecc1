pub mod articles;
pub mod auth;
pub mod certificates;
pub mod envelope;
pub mod home;
pub mod project_categories;
pub mod projects;
pub mod tags;

use serde::Deserialize;

use crate::domain::use_cases::ListParams;

/// Query-string parameters shared by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl From<ListQuery> for ListParams {
    fn from(query: ListQuery) -> Self {
        ListParams {
            page: query.page,
            limit: query.limit,
            search: query.search.unwrap_or_default(),
        }
    }
}
