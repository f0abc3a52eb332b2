//! `RemoteDirectoryClient`: the five geographic-directory and user calls.
//!
//! # Design
//! The client holds only a base address and a transport; nothing is shared
//! or mutated between calls, so one instance can serve any number of
//! concurrent callers. Each operation is split the same way:
//!
//! - `build_*` produces the exact `HttpRequest` (pure, no I/O).
//! - `Transport::execute` performs the round-trip.
//! - `parse_response` checks for a 2xx status and decodes the body as JSON.
//!
//! Payloads are passed through as `serde_json::Value`. Every failure is
//! logged once, at the single exit point in `call`, and then returned.

use std::error::Error as _;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ConfigError, Failure, RequestFailed};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::{DistrictsQuery, EntityId, Operation, ProvincesQuery};

const APPLICATION_JSON: &str = "application/json";

/// Async client for the remote directory API.
#[derive(Debug, Clone)]
pub struct RemoteDirectoryClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl RemoteDirectoryClient<ReqwestTransport> {
    /// Client over a fresh reqwest transport honoring `config.timeout`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T> RemoteDirectoryClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self::with_base_url(&config.base_url, transport)
    }

    /// Skips `ClientConfig` validation; a trailing `/` is still stripped.
    pub fn with_base_url(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_fetch_countries(&self) -> HttpRequest {
        self.get(Operation::FetchCountries)
    }

    /// The country identifier is not part of the request: the endpoint
    /// returns every department regardless. It is accepted so callers keep
    /// a stable signature if the server ever starts filtering.
    pub fn build_fetch_departments(&self, _country_id: &EntityId) -> HttpRequest {
        self.get(Operation::FetchDepartments)
    }

    pub fn build_fetch_provinces(&self, department_id: &EntityId) -> Result<HttpRequest, Failure> {
        let query = ProvincesQuery {
            department_id: department_id.clone(),
        };
        self.post(Operation::FetchProvinces, &query)
    }

    pub fn build_fetch_districts(&self, province_id: &EntityId) -> Result<HttpRequest, Failure> {
        let query = DistrictsQuery {
            province_id: province_id.clone(),
        };
        self.post(Operation::FetchDistricts, &query)
    }

    pub fn build_create_user<U>(&self, user: &U) -> Result<HttpRequest, Failure>
    where
        U: Serialize + ?Sized,
    {
        self.post(Operation::CreateUser, user)
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    fn get(&self, operation: Operation) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(operation),
            headers: vec![("accept".to_string(), APPLICATION_JSON.to_string())],
            body: None,
        }
    }

    fn post<B>(&self, operation: Operation, body: &B) -> Result<HttpRequest, Failure>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(Failure::Serialization)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(operation),
            headers: vec![
                ("content-type".to_string(), APPLICATION_JSON.to_string()),
                ("accept".to_string(), APPLICATION_JSON.to_string()),
            ],
            body: Some(body),
        })
    }
}

impl<T: Transport> RemoteDirectoryClient<T> {
    /// `GET /getPaises`.
    pub async fn fetch_countries(&self) -> Result<Value, RequestFailed> {
        let request = Ok(self.build_fetch_countries());
        self.call(Operation::FetchCountries, request).await
    }

    /// `GET /getDepartamentos`. See `build_fetch_departments` for why
    /// `country_id` is not sent.
    pub async fn fetch_departments(
        &self,
        country_id: impl Into<EntityId>,
    ) -> Result<Value, RequestFailed> {
        let request = Ok(self.build_fetch_departments(&country_id.into()));
        self.call(Operation::FetchDepartments, request).await
    }

    /// `POST /getProvincias` with `{"departmentId": ..}`.
    pub async fn fetch_provinces(
        &self,
        department_id: impl Into<EntityId>,
    ) -> Result<Value, RequestFailed> {
        let request = self.build_fetch_provinces(&department_id.into());
        self.call(Operation::FetchProvinces, request).await
    }

    /// `POST /getDistritos` with `{"provinceId": ..}`.
    pub async fn fetch_districts(
        &self,
        province_id: impl Into<EntityId>,
    ) -> Result<Value, RequestFailed> {
        let request = self.build_fetch_districts(&province_id.into());
        self.call(Operation::FetchDistricts, request).await
    }

    /// `POST /crearUsuario` with `user` serialized verbatim.
    pub async fn create_user<U>(&self, user: &U) -> Result<Value, RequestFailed>
    where
        U: Serialize + ?Sized,
    {
        let request = self.build_create_user(user);
        self.call(Operation::CreateUser, request).await
    }

    async fn call(
        &self,
        operation: Operation,
        request: Result<HttpRequest, Failure>,
    ) -> Result<Value, RequestFailed> {
        let outcome = match request {
            Ok(request) => self.round_trip(operation, request).await,
            Err(failure) => Err(failure),
        };

        outcome.map_err(|failure| {
            let err = RequestFailed { operation, failure };
            tracing::error!(
                operation = operation.as_str(),
                status = err.status(),
                error = %err.failure,
                cause = err.failure.source().map(tracing::field::display),
                "error {}",
                operation.description()
            );
            err
        })
    }

    async fn round_trip(
        &self,
        operation: Operation,
        request: HttpRequest,
    ) -> Result<Value, Failure> {
        tracing::debug!(
            operation = operation.as_str(),
            method = request.method.as_str(),
            url = %request.url,
            "sending request"
        );
        let response = self.transport.execute(request).await?;
        parse_response(response)
    }
}

/// Accept any 2xx status and decode the body as JSON, unmodified.
pub fn parse_response(response: HttpResponse) -> Result<Value, Failure> {
    if !response.is_success() {
        let content_type = response.header("content-type").map(str::to_string);
        return Err(Failure::Status {
            status: response.status,
            content_type,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(Failure::Deserialization)
}
