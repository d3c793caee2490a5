//! Behavioural tests for the HTTP optimization client and OSRM provider.
//!
//! Requests go to a loopback server that answers with canned bodies, so no
//! external service is needed.

mod support;

use std::cell::{Cell, RefCell};
use std::time::Duration;

use ecoroute_core::test_support::{block_on, delhi_agra_jaipur};
use ecoroute_core::{
    CargoType, DirectionsError, DirectionsProvider, DirectionsRequest, NetworkError,
    OptimizationClient, OptimizationResult, Position, StopRequest, TravelMode, validate,
};
use ecoroute_data::{HttpOptimizationClient, HttpOptimizationClientConfig, OsrmDirectionsProvider};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::{CannedServer, refused_url};
use tokio::sync::Notify;

const SHORT_TIMEOUT: Duration = Duration::from_secs(1);

/// Canned reply, or `None` when nothing should be listening.
type Reply = Option<(u16, String)>;

#[derive(Default)]
struct HttpWorld {
    reply: RefCell<Reply>,
    stalls: Cell<bool>,
    received: RefCell<Option<String>>,
    optimization: RefCell<Option<Result<OptimizationResult, NetworkError>>>,
    directions: RefCell<Option<Result<Vec<Position>, DirectionsError>>>,
}

impl HttpWorld {
    fn canned(&self, status: u16, body: impl Into<String>) {
        self.reply.replace(Some((status, body.into())));
    }

    fn received(&self) -> String {
        self.received.borrow().clone().expect("request captured")
    }
}

#[fixture]
fn world() -> HttpWorld {
    HttpWorld::default()
}

fn stops() -> StopRequest {
    StopRequest::new(
        ["New Delhi, India", "Agra, India", "Jaipur, India"],
        500.0,
        CargoType::Standard,
        48,
    )
    .expect("valid request")
}

fn directions_request() -> DirectionsRequest {
    let validated = validate(delhi_agra_jaipur()).expect("valid fixture");
    DirectionsRequest::from_result(&validated, TravelMode::Driving).expect("three stops")
}

// --- Given steps ---

#[given("an optimization service returning the Delhi, Agra and Jaipur route")]
fn optimizer_returns_route(world: &HttpWorld) {
    let body = serde_json::to_string(&delhi_agra_jaipur()).expect("serialise fixture");
    world.canned(200, body);
}

#[given("an optimization service declining with {message}")]
fn optimizer_declines(world: &HttpWorld, message: String) {
    let body = serde_json::json!({
        "status": "error",
        "message": message.trim_matches('"'),
    });
    world.canned(200, body.to_string());
}

#[given("an optimization service that is not running")]
fn optimizer_down(world: &HttpWorld) {
    world.reply.replace(None);
}

#[given("an optimization service that never answers")]
fn optimizer_stalls(world: &HttpWorld) {
    world.stalls.set(true);
}

#[given("an OSRM server returning a two-point route")]
fn osrm_returns_route(world: &HttpWorld) {
    world.canned(
        200,
        r#"{"code": "Ok", "routes": [{"geometry": {"type": "LineString", "coordinates": [[77.2, 28.6], [75.8, 26.9]]}, "distance": 270000.0, "duration": 18000.0}]}"#,
    );
}

#[given("an OSRM server answering NoRoute")]
fn osrm_no_route(world: &HttpWorld) {
    world.canned(400, r#"{"code": "NoRoute", "message": "Impossible route between points"}"#);
}

// --- When steps ---

#[when("I submit three stops to the optimization service")]
fn submit_stops(world: &HttpWorld) {
    let reply = world.reply.borrow().clone();
    let request = stops();
    let (received, outcome) = block_on(async {
        match reply {
            Some((status, body)) => {
                let server = CannedServer::bind().await;
                let client = HttpOptimizationClient::new(server.url()).expect("client builds");
                let (received, outcome) =
                    tokio::join!(server.respond(status, &body), client.submit(&request));
                (Some(received), outcome)
            }
            None => {
                let client =
                    HttpOptimizationClient::new(refused_url().await).expect("client builds");
                (None, client.submit(&request).await)
            }
        }
    });
    world.received.replace(received);
    world.optimization.replace(Some(outcome));
}

#[when("I submit three stops with a one second timeout")]
fn submit_with_short_timeout(world: &HttpWorld) {
    assert!(world.stalls.get(), "stalled service configured");
    let request = stops();
    let (received, outcome) = block_on(async {
        let server = CannedServer::bind().await;
        let client = HttpOptimizationClient::with_config(
            HttpOptimizationClientConfig::new(server.url()).with_timeout(SHORT_TIMEOUT),
        )
        .expect("client builds");
        let release = Notify::new();
        let submit = async {
            let outcome = client.submit(&request).await;
            release.notify_one();
            outcome
        };
        tokio::join!(server.stall(&release), submit)
    });
    world.received.replace(Some(received));
    world.optimization.replace(Some(outcome));
}

#[when("I request driving directions")]
fn request_directions(world: &HttpWorld) {
    let (status, body) = world.reply.borrow().clone().expect("OSRM reply configured");
    let request = directions_request();
    let (received, outcome) = block_on(async {
        let server = CannedServer::bind().await;
        let provider = OsrmDirectionsProvider::new(server.url()).expect("provider builds");
        tokio::join!(server.respond(status, &body), provider.route(&request))
    });
    world.received.replace(Some(received));
    world.directions.replace(Some(outcome));
}

// --- Then steps ---

#[then("the service received the stops as JSON")]
fn received_stops(world: &HttpWorld) {
    let received = world.received();
    assert!(received.starts_with("POST /api/optimize "), "got {received}");
    let (_, body) = received.split_once("\r\n\r\n").expect("request body");
    let json: serde_json::Value = serde_json::from_str(body).expect("JSON body");
    assert_eq!(
        json["locations"],
        serde_json::json!(["New Delhi, India", "Agra, India", "Jaipur, India"])
    );
    assert_eq!(json["cargo_type"], "Standard");
    assert_eq!(json["max_delivery_hours"], 48);
}

#[then("the decoded result reports success")]
fn decoded_success(world: &HttpWorld) {
    let outcome = world.optimization.borrow();
    let result = outcome
        .as_ref()
        .expect("submission ran")
        .as_ref()
        .expect("decoded result");
    assert_eq!(*result, delhi_agra_jaipur());
}

#[then("the decoded result carries the message {message}")]
fn decoded_message(world: &HttpWorld, message: String) {
    let outcome = world.optimization.borrow();
    let result = outcome
        .as_ref()
        .expect("submission ran")
        .as_ref()
        .expect("decoded result");
    assert!(!result.is_success());
    assert_eq!(result.message.as_deref(), Some(message.trim_matches('"')));
}

#[then("a network error is reported")]
fn network_error(world: &HttpWorld) {
    let outcome = world.optimization.borrow();
    let err = outcome
        .as_ref()
        .expect("submission ran")
        .as_ref()
        .expect_err("unreachable service");
    assert!(matches!(err, NetworkError::Network { .. }), "got {err:?}");
}

#[then("a timeout naming the optimize endpoint is reported")]
fn timeout_error(world: &HttpWorld) {
    assert!(world.received().starts_with("POST /api/optimize "));
    let outcome = world.optimization.borrow();
    let err = outcome
        .as_ref()
        .expect("submission ran")
        .as_ref()
        .expect_err("stalled service");
    match err {
        NetworkError::Timeout { url, timeout_secs } => {
            assert!(url.ends_with("/api/optimize"), "got {url}");
            assert_eq!(*timeout_secs, SHORT_TIMEOUT.as_secs());
        }
        other => panic!("expected Timeout, found {other:?}"),
    }
}

#[then("the path is returned as latitude, longitude pairs")]
fn path_flipped(world: &HttpWorld) {
    let outcome = world.directions.borrow();
    let path = outcome
        .as_ref()
        .expect("lookup ran")
        .as_ref()
        .expect("path");
    assert_eq!(
        path.as_slice(),
        [Position::new(28.6, 77.2), Position::new(26.9, 75.8)]
    );
}

#[then("the OSRM request used the driving profile")]
fn driving_profile(world: &HttpWorld) {
    let received = world.received();
    assert!(
        received.starts_with("GET /route/v1/driving/77.2,28.6;78,27.1;75.8,26.9?"),
        "got {received}"
    );
    assert!(received.contains("geometries=geojson"));
}

#[then("a no-route error is reported")]
fn no_route_error(world: &HttpWorld) {
    let outcome = world.directions.borrow();
    let err = outcome
        .as_ref()
        .expect("lookup ran")
        .as_ref()
        .expect_err("no route");
    assert_eq!(
        *err,
        DirectionsError::NoRoute {
            message: "Impossible route between points".into(),
        }
    );
}

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_clients.feature", name = $title)]
        fn $fn_name(world: HttpWorld) {
            let _ = world;
        }
    };
}

register_scenario!(posting_stops, "posting stops to the optimization service");
register_scenario!(declined_optimization, "surfacing a declined optimization");
register_scenario!(unreachable_optimizer, "reporting an unreachable optimization service");
register_scenario!(stalled_optimizer, "timing out on a stalled optimization service");
register_scenario!(driving_route_through_osrm, "resolving a driving route through OSRM");
register_scenario!(missing_osrm_route, "reporting an OSRM route that does not exist");
