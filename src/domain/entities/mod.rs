pub mod article;
pub mod certificate;
pub mod project;
pub mod project_category;
pub mod tag;
pub mod token;
pub mod user;

use serde::Serializer;

/// Internal numeric ids go over the wire as strings to avoid precision
/// loss in JSON consumers.
pub fn id_as_string<S>(id: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_string())
}
