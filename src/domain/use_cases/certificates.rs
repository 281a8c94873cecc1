use uuid::Uuid;

use super::{ListParams, ListResult};
use crate::domain::entities::certificate::{
    Certificate, CertificateInsert, CertificatePayload, CertificateResponse,
};
use crate::domain::identity;
use crate::domain::validation::FormValidator;
use crate::errors::AppError;
use crate::interfaces::repositories::certificate::CertificateRepository;

pub struct CertificateHandler<R> {
    repo: R,
}

impl<R: CertificateRepository> CertificateHandler<R> {
    pub fn new(repo: R) -> Self {
        CertificateHandler { repo }
    }

    pub async fn list(
        &self,
        params: &ListParams,
    ) -> Result<ListResult<CertificateResponse>, AppError> {
        let (certificates, total) = self
            .repo
            .list(&params.search, params.page, params.limit)
            .await?;
        let items = certificates
            .into_iter()
            .map(CertificateResponse::from)
            .collect();
        Ok(ListResult { items, total })
    }

    pub async fn get(&self, uuid: &str) -> Result<CertificateResponse, AppError> {
        let certificate = self.require(uuid).await?;
        Ok(CertificateResponse::from(certificate))
    }

    pub async fn create(
        &self,
        payload: CertificatePayload,
    ) -> Result<CertificateResponse, AppError> {
        let insert = self.validate(payload, None).await?;
        let certificate = self.repo.create(&insert).await?;
        Ok(CertificateResponse::from(certificate))
    }

    pub async fn update(
        &self,
        uuid: &str,
        payload: CertificatePayload,
    ) -> Result<CertificateResponse, AppError> {
        let current = self.require(uuid).await?;
        let insert = self.validate(payload, Some(current.id)).await?;
        let certificate = self.repo.update(current.id, &insert).await?;
        Ok(CertificateResponse::from(certificate))
    }

    pub async fn delete(&self, uuid: &str) -> Result<(), AppError> {
        let current = self.require(uuid).await?;
        self.repo.delete(current.id).await
    }

    async fn require(&self, uuid: &str) -> Result<Certificate, AppError> {
        let not_found = || AppError::NotFound("Certificate not found".to_string());
        let uuid = Uuid::parse_str(uuid).map_err(|_| not_found())?;
        self.repo.find_by_uuid(&uuid).await?.ok_or_else(not_found)
    }

    async fn validate(
        &self,
        payload: CertificatePayload,
        exclude_id: Option<i64>,
    ) -> Result<CertificateInsert, AppError> {
        let mut v = FormValidator::new();
        let name = v.required("name", payload.name.as_deref(), "Name");
        v.min_length("name", name, 2, "Name");
        v.max_length("name", name, 255, "Name");
        let organization = v.required("organization", payload.organization.as_deref(), "Organization");
        v.min_length("organization", organization, 2, "Organization");
        v.max_length("organization", organization, 255, "Organization");
        let month_obtained =
            v.required("month_obtained", payload.month_obtained.as_deref(), "Month obtained");
        v.max_length("month_obtained", month_obtained, 255, "Month obtained");
        let year_obtained =
            v.required("year_obtained", payload.year_obtained.as_deref(), "Year obtained");
        v.max_length("year_obtained", year_obtained, 255, "Year obtained");
        let month_expired =
            v.required("month_expired", payload.month_expired.as_deref(), "Month expired");
        v.max_length("month_expired", month_expired, 255, "Month expired");
        let year_expired =
            v.required("year_expired", payload.year_expired.as_deref(), "Year expired");
        v.max_length("year_expired", year_expired, 255, "Year expired");
        let url = v.required("url", payload.url.as_deref(), "URL");
        v.url("url", url, "URL");
        let description = v.required("description", payload.description.as_deref(), "Description");
        v.min_length("description", description, 2, "Description");

        if let Some(name) = name {
            if self.repo.name_exists(name, exclude_id).await? {
                v.push("name", "Name already exists");
            }
        }
        v.finish()?;

        let CertificatePayload {
            name,
            organization,
            month_obtained,
            year_obtained,
            month_expired,
            year_expired,
            url,
            description,
        } = payload;
        match (
            name,
            organization,
            month_obtained,
            year_obtained,
            month_expired,
            year_expired,
            url,
            description,
        ) {
            (
                Some(name),
                Some(organization),
                Some(month_obtained),
                Some(year_obtained),
                Some(month_expired),
                Some(year_expired),
                Some(url),
                Some(description),
            ) => Ok(CertificateInsert {
                uuid: identity::new_external_id(),
                name,
                organization,
                month_obtained,
                year_obtained,
                month_expired,
                year_expired,
                url,
                description,
            }),
            _ => Err(AppError::InternalError(
                "validated certificate input was incomplete".into(),
            )),
        }
    }
}
