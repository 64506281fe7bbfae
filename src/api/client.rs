//! Blocking HTTP client for the WaniKani v2 API.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use super::WaniKani;
use super::models::{
  AssignmentData, Collection, ErrorBody, NewReview, Report, Resource, ReviewRequest, Summary, SubjectData,
};
use crate::config;
use crate::domain::{Assignment, AssignmentId, Subject, SubjectId};
use crate::error::{Result, WkError};

pub struct WaniKaniClient {
  http: Client,
  base_url: String,
}

impl WaniKaniClient {
  pub fn new(base_url: &str, token: &str) -> Result<Self> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| WkError::InvalidToken)?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(
      HeaderName::from_static("wanikani-revision"),
      HeaderValue::from_static(config::API_REVISION),
    );

    let http = Client::builder()
      .default_headers(headers)
      .timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECS))
      .build()?;

    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }

  fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
    tracing::debug!("GET {}", url);
    let response = self.http.get(url).query(query).send()?;
    Ok(ensure_success(response)?.json()?)
  }

  /// Fetch every page of an assignment collection
  fn assignments(&self, filter: &str) -> Result<Vec<Assignment>> {
    let mut assignments = Vec::new();
    let first = self.url("assignments");
    let mut page: Collection<AssignmentData> = self.get_json(&first, &[(filter, "")])?;

    loop {
      for resource in page.data {
        match resource.into_assignment() {
          Ok(assignment) => assignments.push(assignment),
          Err(e) => tracing::warn!("Skipping assignment: {}", e),
        }
      }
      match page.pages.next_url {
        Some(next) => page = self.get_json(&next, &[])?,
        None => break,
      }
    }

    tracing::info!("Fetched {} assignments ({})", assignments.len(), filter);
    Ok(assignments)
  }
}

/// Turn a non-2xx response into an API error carrying the server's message
fn ensure_success(response: Response) -> Result<Response> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let body = response.text().unwrap_or_default();
  let message = serde_json::from_str::<ErrorBody>(&body)
    .ok()
    .and_then(|b| b.error)
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
  tracing::error!("API request failed: {} {}", status.as_u16(), message);

  Err(WkError::Api {
    status: status.as_u16(),
    message,
  })
}

impl WaniKani for WaniKaniClient {
  fn summary(&self) -> Result<Summary> {
    let report: Report<Summary> = self.get_json(&self.url("summary"), &[])?;
    Ok(report.data)
  }

  fn review_assignments(&self) -> Result<Vec<Assignment>> {
    self.assignments("immediately_available_for_review")
  }

  fn lesson_assignments(&self) -> Result<Vec<Assignment>> {
    self.assignments("immediately_available_for_lessons")
  }

  fn subject(&self, id: SubjectId) -> Result<Subject> {
    let resource: Resource<SubjectData> = self.get_json(&self.url(&format!("subjects/{}", id)), &[])?;
    resource.into_subject()
  }

  fn create_review(&self, assignment_id: AssignmentId, incorrect_meaning: u32, incorrect_reading: u32) -> Result<()> {
    let request = ReviewRequest {
      review: NewReview {
        assignment_id,
        incorrect_meaning_answers: incorrect_meaning,
        incorrect_reading_answers: incorrect_reading,
      },
    };
    let response = self.http.post(self.url("reviews")).json(&request).send()?;
    ensure_success(response)?;
    Ok(())
  }

  fn start_assignment(&self, assignment_id: AssignmentId) -> Result<()> {
    let url = self.url(&format!("assignments/{}/start", assignment_id));
    let response = self
      .http
      .put(url)
      .json(&serde_json::json!({ "assignment": {} }))
      .send()?;
    ensure_success(response)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_url_joins_cleanly() {
    let client = WaniKaniClient::new("https://api.wanikani.com/v2/", "token").unwrap();
    assert_eq!(client.url("summary"), "https://api.wanikani.com/v2/summary");
    assert_eq!(client.url("/subjects/1"), "https://api.wanikani.com/v2/subjects/1");
  }

  #[test]
  fn test_token_with_newline_rejected() {
    let result = WaniKaniClient::new("https://api.wanikani.com/v2", "abc\ndef");
    assert!(matches!(result, Err(WkError::InvalidToken)));
  }
}
