use lvb_cloud::{CloudError, DecoraCloud, LevitonClient, SwitchUpdate};
use lvb_core::models::{DeviceId, PowerState, SessionToken};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LevitonClient {
    LevitonClient::new(&server.uri()).expect("client")
}

fn token() -> SessionToken {
    SessionToken::new("tok-1")
}

fn switch_json() -> serde_json::Value {
    json!({
        "id": 42,
        "serial": "0D1B2C3D",
        "name": "Hallway",
        "manufacturer": "Leviton",
        "model": "DW6HD-1BZ",
        "version": "1.21.0",
        "power": "ON",
        "brightness": 42,
        "minLevel": 1,
        "maxLevel": 100
    })
}

#[tokio::test]
async fn login_posts_credentials_and_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Person/login"))
        .and(body_json(json!({
            "email": "me@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tok-1",
            "userId": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let login = client_for(&server)
        .login("me@example.com", "hunter2")
        .await
        .expect("login");

    assert_eq!(login.token, token());
    assert_eq!(login.user_id, 7);
}

#[tokio::test]
async fn session_token_rides_the_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/IotSwitches/42"))
        .and(header("authorization", "tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(switch_json()))
        .expect(1)
        .mount(&server)
        .await;

    let device = client_for(&server)
        .get_iot_switch(DeviceId(42), &token())
        .await
        .expect("get switch");

    assert_eq!(device.serial, "0D1B2C3D");
    assert_eq!(device.power, PowerState::On);
    assert_eq!(device.brightness, 42);
}

#[tokio::test]
async fn set_sends_only_the_requested_field() {
    let server = MockServer::start().await;
    let mut updated = switch_json();
    updated["power"] = json!("OFF");
    Mock::given(method("PUT"))
        .and(path("/IotSwitches/42"))
        .and(header("authorization", "tok-1"))
        .and(body_json(json!({ "power": "OFF" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let device = client_for(&server)
        .set_iot_switch(DeviceId(42), &token(), SwitchUpdate::power(false))
        .await
        .expect("set switch");

    assert_eq!(device.power, PowerState::Off);
}

#[tokio::test]
async fn residence_listing_parses_every_switch() {
    let server = MockServer::start().await;
    let mut second = switch_json();
    second["id"] = json!(43);
    second["serial"] = json!("0D1B2C3E");
    Mock::given(method("GET"))
        .and(path("/Residences/9/iotSwitches"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([switch_json(), second])),
        )
        .mount(&server)
        .await;

    let devices = client_for(&server)
        .residence_iot_switches(9, &token())
        .await
        .expect("switches");

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[1].id, DeviceId(43));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Person/7/residentialPermissions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .residential_permissions(7, &token())
        .await
        .expect_err("should fail");

    assert!(matches!(err, CloudError::Auth { status: 401 }));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ResidentialAccounts/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .residential_account(3, &token())
        .await
        .expect_err("should fail");

    match err {
        CloudError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
