mod common;

use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_vehicle_defaults_and_round_trip() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p1@example.com").await;
    let admin = app.token_for(1, "admin");

    let res = app
        .request(
            "POST",
            "/vehicles",
            Some(&admin),
            Some(json!({
                "partnerId": partner_id,
                "vehicleType": "scooter",
                "brand": "Honda",
                "model": "Activa",
                "registrationNumber": "BR01AB1234",
                "year": 2023,
                "color": "Black",
                "location": "Patna",
                "hourlyRate": 50,
                "dailyRate": 299,
                "monthlyRate": 8000
            })),
        )
        .await;

    assert_eq!(res.status(), 201);
    let created = parse_body(res).await;
    assert_eq!(created["status"], "available");
    assert_eq!(created["gpsEnabled"], true);

    let id = created["id"].as_i64().unwrap();
    let res = app.request("GET", &format!("/vehicles?id={id}"), None, None).await;
    assert_eq!(res.status(), 200);
    let fetched = parse_body(res).await;

    assert_eq!(fetched["partnerId"], partner_id);
    assert_eq!(fetched["vehicleType"], "scooter");
    assert_eq!(fetched["brand"], "Honda");
    assert_eq!(fetched["model"], "Activa");
    assert_eq!(fetched["registrationNumber"], "BR01AB1234");
    assert_eq!(fetched["year"], 2023);
    assert_eq!(fetched["color"], "Black");
    assert_eq!(fetched["location"], "Patna");
    assert_eq!(fetched["hourlyRate"], 50);
    assert_eq!(fetched["dailyRate"], 299);
    assert_eq!(fetched["monthlyRate"], 8000);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p2@example.com").await;
    let admin = app.token_for(1, "admin");

    app.seed_vehicle(&admin, partner_id, "BR01XY0001").await;

    let res = app
        .request(
            "POST",
            "/vehicles",
            Some(&admin),
            Some(json!({
                "partnerId": partner_id,
                "vehicleType": "bike",
                "brand": "Bajaj",
                "model": "Pulsar",
                "registrationNumber": "BR01XY0001",
                "year": 2022,
                "color": "Red",
                "location": "Patna",
                "hourlyRate": 60,
                "dailyRate": 350,
                "monthlyRate": 9000
            })),
        )
        .await;

    assert_eq!(res.status(), 409);
    let body = parse_body(res).await;
    assert_eq!(body["code"], "DUPLICATE_REGISTRATION");

    // no second row was persisted
    let res = app.request("GET", "/vehicles?search=BR01XY0001", None, None).await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_vehicle_validation_codes() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p3@example.com").await;
    let admin = app.token_for(1, "admin");

    let valid = json!({
        "partnerId": partner_id,
        "vehicleType": "scooter",
        "brand": "Honda",
        "model": "Activa",
        "registrationNumber": "BR01VC0001",
        "year": 2023,
        "color": "Black",
        "location": "Patna",
        "hourlyRate": 50,
        "dailyRate": 299,
        "monthlyRate": 8000
    });

    // missing brand
    let mut payload = valid.clone();
    payload.as_object_mut().unwrap().remove("brand");
    let res = app.request("POST", "/vehicles", Some(&admin), Some(payload)).await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse_body(res).await["code"], "MISSING_FIELD");

    // unknown vehicle type
    let mut payload = valid.clone();
    payload["vehicleType"] = json!("car");
    let res = app.request("POST", "/vehicles", Some(&admin), Some(payload)).await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse_body(res).await["code"], "INVALID_VEHICLE_TYPE");

    // non-numeric year
    let mut payload = valid.clone();
    payload["year"] = json!("abc");
    let res = app.request("POST", "/vehicles", Some(&admin), Some(payload)).await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse_body(res).await["code"], "INVALID_NUMBER");

    // unknown partner
    let mut payload = valid.clone();
    payload["partnerId"] = json!(99999);
    let res = app.request("POST", "/vehicles", Some(&admin), Some(payload)).await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse_body(res).await["code"], "PARTNER_NOT_FOUND");
}

#[tokio::test]
async fn test_numeric_fields_accept_strings() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p4@example.com").await;
    let admin = app.token_for(1, "admin");

    let res = app
        .request(
            "POST",
            "/vehicles",
            Some(&admin),
            Some(json!({
                "partnerId": partner_id.to_string(),
                "vehicleType": "electric",
                "brand": "Ather",
                "model": "450X",
                "registrationNumber": "BR01EV0001",
                "year": "2024",
                "color": "White",
                "location": "Patna",
                "hourlyRate": "80",
                "dailyRate": "499",
                "monthlyRate": "12000"
            })),
        )
        .await;

    assert_eq!(res.status(), 201);
    let created = parse_body(res).await;
    assert_eq!(created["year"], 2024);
    assert_eq!(created["hourlyRate"], 80);
}

#[tokio::test]
async fn test_update_vehicle_partial() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p5@example.com").await;
    let admin = app.token_for(1, "admin");
    let id = app.seed_vehicle(&admin, partner_id, "BR01UP0001").await;

    let res = app
        .request(
            "PUT",
            &format!("/vehicles?id={id}"),
            Some(&admin),
            Some(json!({ "color": "Blue", "status": "maintenance" })),
        )
        .await;
    assert_eq!(res.status(), 200);
    let updated = parse_body(res).await;
    assert_eq!(updated["color"], "Blue");
    assert_eq!(updated["status"], "maintenance");
    // untouched fields survive
    assert_eq!(updated["brand"], "Honda");
    assert_eq!(updated["registrationNumber"], "BR01UP0001");

    // changing the plate onto an existing one is rejected
    app.seed_vehicle(&admin, partner_id, "BR01UP0002").await;
    let res = app
        .request(
            "PUT",
            &format!("/vehicles?id={id}"),
            Some(&admin),
            Some(json!({ "registrationNumber": "BR01UP0002" })),
        )
        .await;
    assert_eq!(res.status(), 409);
    assert_eq!(parse_body(res).await["code"], "DUPLICATE_REGISTRATION");

    // re-submitting the current plate is fine
    let res = app
        .request(
            "PUT",
            &format!("/vehicles?id={id}"),
            Some(&admin),
            Some(json!({ "registrationNumber": "BR01UP0001" })),
        )
        .await;
    assert_eq!(res.status(), 200);

    let res = app
        .request("PUT", "/vehicles?id=99999", Some(&admin), Some(json!({ "color": "Red" })))
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_delete_vehicle_returns_record() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p6@example.com").await;
    let admin = app.token_for(1, "admin");
    let id = app.seed_vehicle(&admin, partner_id, "BR01DL0001").await;

    let res = app.request("DELETE", &format!("/vehicles?id={id}"), Some(&admin), None).await;
    assert_eq!(res.status(), 200);
    let deleted = parse_body(res).await;
    assert_eq!(deleted["id"], id);
    assert_eq!(deleted["registrationNumber"], "BR01DL0001");

    let res = app.request("GET", &format!("/vehicles?id={id}"), None, None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(parse_body(res).await["code"], "NOT_FOUND");

    let res = app.request("DELETE", &format!("/vehicles?id={id}"), Some(&admin), None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_search_filter_matches_brand_model_registration() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p7@example.com").await;
    let admin = app.token_for(1, "admin");

    app.seed_vehicle(&admin, partner_id, "BR01SR0001").await; // Honda Activa
    app.request(
        "POST",
        "/vehicles",
        Some(&admin),
        Some(json!({
            "partnerId": partner_id,
            "vehicleType": "bike",
            "brand": "Yamaha",
            "model": "R15",
            "registrationNumber": "BR01SR0002",
            "year": 2023,
            "color": "Blue",
            "location": "Patna",
            "hourlyRate": 90,
            "dailyRate": 599,
            "monthlyRate": 15000
        })),
    )
    .await;

    let res = app.request("GET", "/vehicles?search=Activa", None, None).await;
    assert_eq!(res.status(), 200);
    let list = parse_body(res).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["model"], "Activa");

    // registration numbers are searchable too
    let res = app.request("GET", "/vehicles?search=SR0002", None, None).await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_filters_and_limit_clamp() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p8@example.com").await;

    // seed past the cap straight through the repository
    use rental_backend::domain::models::vehicle::{NewVehicle, VehicleStatus, VehicleType};
    for i in 0..105 {
        let vehicle = NewVehicle {
            partner_id,
            vehicle_type: if i % 2 == 0 { VehicleType::Scooter } else { VehicleType::Bike },
            brand: "Honda".to_string(),
            model: "Activa".to_string(),
            registration_number: format!("BR01BL{i:04}"),
            year: 2023,
            color: "Black".to_string(),
            image: None,
            hourly_rate: 50,
            daily_rate: 299,
            monthly_rate: 8000,
            status: VehicleStatus::Available,
            location: "Patna".to_string(),
            gps_enabled: true,
            last_service_date: None,
        };
        app.state.vehicle_repo.create(&vehicle).await.unwrap();
    }

    let res = app.request("GET", "/vehicles?limit=500", None, None).await;
    assert_eq!(res.status(), 200);
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 100);

    let res = app.request("GET", "/vehicles?vehicleType=bike&limit=100", None, None).await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 52);

    let res = app.request("GET", "/vehicles?limit=abc", None, None).await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse_body(res).await["code"], "INVALID_NUMBER");
}

#[tokio::test]
async fn test_vehicle_mutations_require_back_office_role() {
    let app = TestApp::new().await;
    let partner_id = app.seed_partner("p9@example.com").await;
    let rider = app.token_for(7, "rider");

    let payload = json!({
        "partnerId": partner_id,
        "vehicleType": "scooter",
        "brand": "Honda",
        "model": "Activa",
        "registrationNumber": "BR01RB0001",
        "year": 2023,
        "color": "Black",
        "location": "Patna",
        "hourlyRate": 50,
        "dailyRate": 299,
        "monthlyRate": 8000
    });

    let res = app.request("POST", "/vehicles", None, Some(payload.clone())).await;
    assert_eq!(res.status(), 401);
    assert_eq!(parse_body(res).await["code"], "UNAUTHORIZED");

    let res = app.request("POST", "/vehicles", Some(&rider), Some(payload.clone())).await;
    assert_eq!(res.status(), 403);
    assert_eq!(parse_body(res).await["code"], "FORBIDDEN");

    // staff shares the back-office permissions
    let staff = app.token_for(8, "staff");
    let res = app.request("POST", "/vehicles", Some(&staff), Some(payload)).await;
    assert_eq!(res.status(), 201);
}
