mod common;

use async_trait::async_trait;
use common::{FakeApi, date, event, hour};
use parking_predictor::availability::AvailabilityLevel;
use parking_predictor::fetch::HttpClient;
use parking_predictor::infra::backend::BackendClient;
use parking_predictor::model::{Impact, TimeQuery};
use parking_predictor::panel::{FAILED_MESSAGE, PanelState, PredictionPanel, load_window};

#[tokio::test]
async fn test_selection_shows_four_cards_and_event_alert() {
    let mut api = FakeApi::new();
    api.events = vec![event(1, "13:00", "15:00", Impact::High)];

    let mut panel = PredictionPanel::new();
    let state = panel.refresh(&api, 1, TimeQuery::new(date(), hour(14))).await;

    let PanelState::Ready(view) = state else {
        panic!("expected Ready, got {state:?}");
    };
    assert_eq!(view.cards.len(), 4);
    assert!(view.cards.iter().all(|c| c.level == AvailabilityLevel::Medium));
    let hours: Vec<u8> = view.cards.iter().map(|c| c.hour.get()).collect();
    assert_eq!(hours, vec![14, 15, 16, 17]);

    let alert = view.alert.as_ref().expect("event alert");
    assert_eq!(alert.impact, Impact::High);
    assert_eq!(alert.event_names, vec!["Event 1"]);
}

#[tokio::test]
async fn test_cards_keep_window_order_regardless_of_completion() {
    let mut api = FakeApi::new();
    api.reverse_delay = true;

    let view = load_window(&api, 2, TimeQuery::new(date(), hour(22)))
        .await
        .unwrap();
    let hours: Vec<u8> = view.cards.iter().map(|c| c.hour.get()).collect();
    assert_eq!(hours, vec![22, 23, 0, 1]);
}

#[tokio::test]
async fn test_wrapped_hours_keep_selected_date() {
    let api = FakeApi::new();
    load_window(&api, 5, TimeQuery::new(date(), hour(23)))
        .await
        .unwrap();

    let requests = api.requests.lock().unwrap();
    assert_eq!(requests.len(), 4);
    for (zone_id, d, _, day_of_week) in requests.iter() {
        assert_eq!(*zone_id, 5);
        assert_eq!(*d, date());
        // 2025-06-01 is a Sunday
        assert_eq!(*day_of_week, 6);
    }
}

#[tokio::test]
async fn test_any_failed_hour_fails_the_panel() {
    let mut api = FakeApi::new();
    api.events = vec![event(1, "13:00", "15:00", Impact::High)];
    api.malformed_hours.insert(16);

    let mut panel = PredictionPanel::new();
    let state = panel.refresh(&api, 1, TimeQuery::new(date(), hour(14))).await;
    assert_eq!(
        state,
        &PanelState::Failed {
            zone_id: 1,
            message: FAILED_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn test_events_failure_still_shows_cards() {
    let mut api = FakeApi::new();
    api.events_fail = true;

    let view = load_window(&api, 1, TimeQuery::new(date(), hour(9)))
        .await
        .unwrap();
    assert_eq!(view.cards.len(), 4);
    assert!(view.alert.is_none());
}

#[tokio::test]
async fn test_event_outside_selected_hour_has_no_alert() {
    let mut api = FakeApi::new();
    api.events = vec![event(1, "10:00", "14:00", Impact::Low)];

    let view = load_window(&api, 1, TimeQuery::new(date(), hour(15)))
        .await
        .unwrap();
    assert!(view.alert.is_none());

    let view = load_window(&api, 1, TimeQuery::new(date(), hour(10)))
        .await
        .unwrap();
    assert!(view.alert.is_some());
}

#[tokio::test]
async fn test_late_result_for_previous_selection_is_ignored() {
    let api = FakeApi::new();
    let query = TimeQuery::new(date(), hour(8));
    let mut panel = PredictionPanel::new();

    let first = panel.begin(1);
    let first_result = load_window(&api, 1, query).await;
    let second = panel.begin(2);
    let second_result = load_window(&api, 2, query).await;

    assert!(panel.apply(second, second_result));
    assert!(!panel.apply(first, first_result));
    match panel.state() {
        PanelState::Ready(view) => assert_eq!(view.zone_id, 2),
        other => panic!("unexpected state {other:?}"),
    }
}

/// Serves a malformed prediction payload and one valid event.
struct MalformedBackend;

#[async_trait]
impl HttpClient for MalformedBackend {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let body = if req.url().path().ends_with("/events") {
            r#"[{"id":1,"name":"Pride Parade","start_time":"13:00","end_time":"15:00","expected_impact":"High"}]"#
        } else {
            r#"{"confidence_score":0.8,"available_spaces":10,"total_spaces":40,"availability_level":"Medium"}"#
        };
        Ok(http::Response::builder()
            .status(200)
            .body(body)
            .unwrap()
            .into())
    }
}

#[tokio::test]
async fn test_malformed_payload_fails_with_no_cards_or_alert() {
    let api = BackendClient::new(MalformedBackend, "http://localhost:8001/api/v1");
    let mut panel = PredictionPanel::new();

    let state = panel.refresh(&api, 1, TimeQuery::new(date(), hour(14))).await;
    match state {
        PanelState::Failed { message, .. } => assert_eq!(message, FAILED_MESSAGE),
        other => panic!("expected Failed, got {other:?}"),
    }
}
