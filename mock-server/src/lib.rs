use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: u32,
    pub nombre: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: u32,
    pub country_id: u32,
    pub nombre: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: u32,
    pub department_id: u32,
    pub nombre: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: u32,
    pub province_id: u32,
    pub nombre: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvincesQuery {
    pub department_id: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictsQuery {
    pub province_id: Value,
}

pub struct Directory {
    pub countries: Vec<Country>,
    pub departments: Vec<Department>,
    pub provinces: Vec<Province>,
    pub districts: Vec<District>,
    pub users: RwLock<Vec<Map<String, Value>>>,
}

pub type Db = Arc<Directory>;

pub fn app() -> Router {
    let db: Db = Arc::new(Directory::seeded());
    Router::new()
        .route("/getPaises", get(get_countries))
        .route("/getDepartamentos", get(get_departments))
        .route("/getProvincias", post(get_provinces))
        .route("/getDistritos", post(get_districts))
        .route("/crearUsuario", post(create_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

impl Directory {
    pub fn seeded() -> Self {
        let named = |names: &[&str]| -> Vec<(u32, String)> {
            names
                .iter()
                .enumerate()
                .map(|(i, n)| (i as u32 + 1, n.to_string()))
                .collect()
        };

        let countries = named(&["Perú", "Chile"])
            .into_iter()
            .map(|(id, nombre)| Country { id, nombre })
            .collect();

        let departments = named(&["Lima", "Arequipa", "Cusco"])
            .into_iter()
            .map(|(id, nombre)| Department {
                id,
                country_id: 1,
                nombre,
            })
            .collect();

        let provinces = [
            (1, 1, "Lima"),
            (2, 1, "Huaral"),
            (3, 2, "Arequipa"),
            (4, 2, "Camaná"),
            (5, 3, "Cusco"),
            (6, 3, "Urubamba"),
        ]
        .into_iter()
        .map(|(id, department_id, nombre)| Province {
            id,
            department_id,
            nombre: nombre.to_string(),
        })
        .collect();

        let districts = [
            (1, 1, "Miraflores"),
            (2, 1, "Barranco"),
            (3, 2, "Chancay"),
            (4, 3, "Cayma"),
            (5, 5, "Wanchaq"),
            (6, 6, "Ollantaytambo"),
        ]
        .into_iter()
        .map(|(id, province_id, nombre)| District {
            id,
            province_id,
            nombre: nombre.to_string(),
        })
        .collect();

        Self {
            countries,
            departments,
            provinces,
            districts,
            users: RwLock::new(Vec::new()),
        }
    }
}

/// Compare a numeric seed id against an id that may arrive as a JSON
/// number or string.
fn id_matches(id: u32, requested: &Value) -> bool {
    match requested {
        Value::Number(n) => n.as_u64() == Some(u64::from(id)),
        Value::String(s) => s.trim() == id.to_string(),
        _ => false,
    }
}

async fn get_countries(State(db): State<Db>) -> Json<Vec<Country>> {
    Json(db.countries.clone())
}

async fn get_departments(State(db): State<Db>) -> Json<Vec<Department>> {
    Json(db.departments.clone())
}

async fn get_provinces(
    State(db): State<Db>,
    Json(query): Json<ProvincesQuery>,
) -> Json<Vec<Province>> {
    Json(
        db.provinces
            .iter()
            .filter(|p| id_matches(p.department_id, &query.department_id))
            .cloned()
            .collect(),
    )
}

async fn get_districts(
    State(db): State<Db>,
    Json(query): Json<DistrictsQuery>,
) -> Json<Vec<District>> {
    Json(
        db.districts
            .iter()
            .filter(|d| id_matches(d.province_id, &query.province_id))
            .cloned()
            .collect(),
    )
}

async fn create_user(
    State(db): State<Db>,
    Json(mut user): Json<Map<String, Value>>,
) -> (StatusCode, Json<Map<String, Value>>) {
    user.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    let count = {
        let mut users = db.users.write().await;
        users.push(user.clone());
        users.len()
    };
    tracing::info!(users = count, "user created");
    (StatusCode::CREATED, Json(user))
}
