//! REST implementation of [`CaseApi`].

use crate::dto::case::{CaseDto, CaseFilter, CaseQuery};
use crate::endpoints;
use crate::http_client::HttpClient;
use async_trait::async_trait;
use medchat_core::case::{Case, CaseApi, CaseDraft};
use medchat_core::error::Result;

#[derive(Clone)]
pub struct RestCaseApi {
    http: HttpClient,
}

impl RestCaseApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CaseApi for RestCaseApi {
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Case>> {
        let dtos: Vec<CaseDto> = self
            .http
            .get_query(endpoints::CASES, &CaseFilter { patient_id })
            .await?;
        Ok(dtos.into_iter().map(Case::from).collect())
    }

    async fn get(&self, case_id: &str) -> Result<Case> {
        let dto: CaseDto = self.http.get(&endpoints::case(case_id)).await?;
        Ok(dto.into())
    }

    async fn create(&self, draft: &CaseDraft) -> Result<Case> {
        let dto: CaseDto = self
            .http
            .post_query(endpoints::CASES, &CaseQuery::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn update(&self, case_id: &str, draft: &CaseDraft) -> Result<Case> {
        let dto: CaseDto = self
            .http
            .put_query(&endpoints::case(case_id), &CaseQuery::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn delete(&self, case_id: &str) -> Result<()> {
        self.http.delete(&endpoints::case(case_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, serve_once, test_client};
    use medchat_core::auth::TokenHandle;

    #[tokio::test]
    async fn test_list_filters_by_patient() {
        let (base, request) = serve_once(http_response(
            200,
            r#"[{"id":"c1","patient_id":"p1","title":"Chest pain","status":"closed"}]"#,
        ))
        .await;
        let api = RestCaseApi::new(test_client(&base, TokenHandle::new()));

        let cases = api.list_for_patient("p1").await.unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].status, medchat_core::case::CaseStatus::Closed);
        assert!(request.await.unwrap().starts_with("GET /cases/?patient_id=p1 "));
    }

    #[tokio::test]
    async fn test_delete_case() {
        let (base, request) = serve_once(http_response(204, "")).await;
        let api = RestCaseApi::new(test_client(&base, TokenHandle::new()));

        api.delete("c9").await.unwrap();
        assert!(request.await.unwrap().starts_with("DELETE /cases/c9 "));
    }
}
