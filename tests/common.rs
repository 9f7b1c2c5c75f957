use rental_backend::{
    api::router::create_router,
    config::Config,
    domain::models::auth::Claims,
    domain::services::approval::ApprovalService,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_coupon_repo::SqliteCouponRepo,
        sqlite_user_repo::SqliteUserRepo, sqlite_vehicle_repo::SqliteVehicleRepo,
    },
    state::AppState,
};

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_ISSUER: &str = "test-issuer";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: TEST_SECRET.to_string(),
            auth_issuer: TEST_ISSUER.to_string(),
        };

        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let approval_service = Arc::new(ApprovalService::new(booking_repo.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            vehicle_repo: Arc::new(SqliteVehicleRepo::new(pool.clone())),
            booking_repo,
            coupon_repo: Arc::new(SqliteCouponRepo::new(pool.clone())),
            approval_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mints an access token the way the external auth service would.
    pub fn token_for(&self, user_id: i64, role: &str) -> String {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            iss: TEST_ISSUER.to_string(),
            sub: user_id.to_string(),
            exp: now + 3600,
            iat: now,
            role: role.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Registers a partner account through the open endpoint, returns its id.
    pub async fn seed_partner(&self, email: &str) -> i64 {
        let res = self
            .request(
                "POST",
                "/users",
                None,
                Some(json!({
                    "name": "Partner",
                    "email": email,
                    "phone": "9990001111",
                    "role": "partner",
                    "city": "Patna"
                })),
            )
            .await;
        assert_eq!(res.status(), 201, "partner seed failed");
        parse_body(res).await["id"].as_i64().unwrap()
    }

    pub async fn seed_rider(&self, email: &str) -> i64 {
        let res = self
            .request(
                "POST",
                "/users",
                None,
                Some(json!({
                    "name": "Rider",
                    "email": email,
                    "phone": "8880001111"
                })),
            )
            .await;
        assert_eq!(res.status(), 201, "rider seed failed");
        parse_body(res).await["id"].as_i64().unwrap()
    }

    pub async fn seed_vehicle(&self, admin_token: &str, partner_id: i64, registration: &str) -> i64 {
        let res = self
            .request(
                "POST",
                "/vehicles",
                Some(admin_token),
                Some(json!({
                    "partnerId": partner_id,
                    "vehicleType": "scooter",
                    "brand": "Honda",
                    "model": "Activa",
                    "registrationNumber": registration,
                    "year": 2023,
                    "color": "Black",
                    "location": "Patna",
                    "hourlyRate": 50,
                    "dailyRate": 299,
                    "monthlyRate": 8000
                })),
            )
            .await;
        assert_eq!(res.status(), 201, "vehicle seed failed");
        parse_body(res).await["id"].as_i64().unwrap()
    }

    pub async fn seed_booking(&self, rider_token: &str, vehicle_id: i64) -> i64 {
        let res = self
            .request(
                "POST",
                "/bookings",
                Some(rider_token),
                Some(json!({
                    "vehicleId": vehicle_id,
                    "startDate": "2025-06-01T10:00:00Z",
                    "endDate": "2025-06-04T10:00:00Z",
                    "durationType": "daily",
                    "pickupLocation": "Patna Junction"
                })),
            )
            .await;
        assert_eq!(res.status(), 201, "booking seed failed");
        parse_body(res).await["id"].as_i64().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
