//! Operation names, identifiers, and request payloads.
//!
//! # Design
//! Response payloads are never typed here: countries, departments,
//! provinces, districts and users come back as `serde_json::Value` and are
//! handed to the caller untouched. Only the two small lookup bodies the
//! client itself produces get dedicated structs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::HttpMethod;

/// The five remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchCountries,
    FetchDepartments,
    FetchProvinces,
    FetchDistricts,
    CreateUser,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::FetchCountries,
        Operation::FetchDepartments,
        Operation::FetchProvinces,
        Operation::FetchDistricts,
        Operation::CreateUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::FetchCountries => "fetch_countries",
            Operation::FetchDepartments => "fetch_departments",
            Operation::FetchProvinces => "fetch_provinces",
            Operation::FetchDistricts => "fetch_districts",
            Operation::CreateUser => "create_user",
        }
    }

    /// Endpoint path relative to the base address.
    pub fn path(self) -> &'static str {
        match self {
            Operation::FetchCountries => "/getPaises",
            Operation::FetchDepartments => "/getDepartamentos",
            Operation::FetchProvinces => "/getProvincias",
            Operation::FetchDistricts => "/getDistritos",
            Operation::CreateUser => "/crearUsuario",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Operation::FetchCountries | Operation::FetchDepartments => HttpMethod::Get,
            Operation::FetchProvinces | Operation::FetchDistricts | Operation::CreateUser => {
                HttpMethod::Post
            }
        }
    }

    /// Used in the failure log line, e.g. "error fetching countries".
    pub fn description(self) -> &'static str {
        match self {
            Operation::FetchCountries => "fetching countries",
            Operation::FetchDepartments => "fetching departments",
            Operation::FetchProvinces => "fetching provinces",
            Operation::FetchDistricts => "fetching districts",
            Operation::CreateUser => "creating user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A department or province identifier. The remote API accepts either a
/// number or a string; it is sent as the bare JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Number(id)
    }
}

impl From<i32> for EntityId {
    fn from(id: i32) -> Self {
        EntityId::Number(id.into())
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId::Number(id.into())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Text(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Text(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// Body of `POST /getProvincias`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvincesQuery {
    pub department_id: EntityId,
}

/// Body of `POST /getDistritos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistrictsQuery {
    pub province_id: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_serializes_as_bare_value() {
        assert_eq!(serde_json::to_string(&EntityId::from(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&EntityId::from("P-7")).unwrap(),
            r#""P-7""#
        );
    }

    #[test]
    fn entity_id_accepts_number_or_string() {
        let id: EntityId = serde_json::from_str("15").unwrap();
        assert_eq!(id, EntityId::Number(15));
        let id: EntityId = serde_json::from_str(r#""15""#).unwrap();
        assert_eq!(id, EntityId::Text("15".to_string()));
    }

    #[test]
    fn lookup_bodies_use_camel_case_keys() {
        let body = ProvincesQuery {
            department_id: 42.into(),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"departmentId":42}"#);

        let body = DistrictsQuery {
            province_id: "P-7".into(),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"provinceId":"P-7"}"#);
    }

    #[test]
    fn only_lookups_by_parent_and_user_creation_are_posts() {
        let posts: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.method() == HttpMethod::Post)
            .collect();
        assert_eq!(
            posts,
            vec![
                Operation::FetchProvinces,
                Operation::FetchDistricts,
                Operation::CreateUser
            ]
        );
    }
}
