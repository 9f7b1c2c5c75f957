use crate::domain::{
    models::vehicle::{NewVehicle, Vehicle},
    ports::{Page, VehicleFilter, VehicleRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteVehicleRepo {
    pool: SqlitePool,
}

impl SqliteVehicleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for SqliteVehicleRepo {
    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (partner_id, vehicle_type, brand, model, registration_number, year, color, image,
                                   hourly_rate, daily_rate, monthly_rate, status, location, gps_enabled, last_service_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(vehicle.partner_id)
        .bind(vehicle.vehicle_type)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.registration_number)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(&vehicle.image)
        .bind(vehicle.hourly_rate)
        .bind(vehicle.daily_rate)
        .bind(vehicle.monthly_rate)
        .bind(vehicle.status)
        .bind(&vehicle.location)
        .bind(vehicle.gps_enabled)
        .bind(vehicle.last_service_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_registration(&self, registration: &str) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE registration_number = ?")
            .bind(registration)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &VehicleFilter, page: Page) -> Result<Vec<Vehicle>, AppError> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM vehicles WHERE 1=1");

        if let Some(vehicle_type) = filter.vehicle_type {
            qb.push(" AND vehicle_type = ").push_bind(vehicle_type);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(location) = &filter.location {
            qb.push(" AND location = ").push_bind(location.clone());
        }
        if let Some(partner_id) = filter.partner_id {
            qb.push(" AND partner_id = ").push_bind(partner_id);
        }
        if let Some(search) = &filter.search {
            // substring match over brand OR model OR registration; case rules
            // follow the store collation
            let pattern = format!("%{search}%");
            qb.push(" AND (brand LIKE ")
                .push_bind(pattern.clone())
                .push(" OR model LIKE ")
                .push_bind(pattern.clone())
                .push(" OR registration_number LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        qb.build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET partner_id=?, vehicle_type=?, brand=?, model=?, registration_number=?, year=?, color=?, image=?,
                                 hourly_rate=?, daily_rate=?, monthly_rate=?, status=?, location=?, gps_enabled=?, last_service_date=?
             WHERE id=?
             RETURNING *",
        )
        .bind(vehicle.partner_id)
        .bind(vehicle.vehicle_type)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.registration_number)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(&vehicle.image)
        .bind(vehicle.hourly_rate)
        .bind(vehicle.daily_rate)
        .bind(vehicle.monthly_rate)
        .bind(vehicle.status)
        .bind(&vehicle.location)
        .bind(vehicle.gps_enabled)
        .bind(vehicle.last_service_date)
        .bind(vehicle.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, Vehicle>("DELETE FROM vehicles WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
