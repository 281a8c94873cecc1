use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id_as_string;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Certificate {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub organization: String,
    pub month_obtained: String,
    pub year_obtained: String,
    pub month_expired: String,
    pub year_expired: String,
    pub url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CertificateInsert {
    pub uuid: Uuid,
    pub name: String,
    pub organization: String,
    pub month_obtained: String,
    pub year_obtained: String,
    pub month_expired: String,
    pub year_expired: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CertificatePayload {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub month_obtained: Option<String>,
    pub year_obtained: Option<String>,
    pub month_expired: Option<String>,
    pub year_expired: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub organization: String,
    pub month_obtained: String,
    pub year_obtained: String,
    pub month_expired: String,
    pub year_expired: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Certificate> for CertificateResponse {
    fn from(certificate: Certificate) -> Self {
        CertificateResponse {
            id: certificate.id,
            uuid: certificate.uuid,
            name: certificate.name,
            organization: certificate.organization,
            month_obtained: certificate.month_obtained,
            year_obtained: certificate.year_obtained,
            month_expired: certificate.month_expired,
            year_expired: certificate.year_expired,
            url: certificate.url,
            description: certificate.description,
            created_at: certificate.created_at,
            updated_at: certificate.updated_at,
        }
    }
}
