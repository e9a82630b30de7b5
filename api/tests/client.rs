use mockito::Matcher;
use scorecast_api::{ApiError, ErrorKind, Prediction, RemoteStore, ScorecastApi, Session};

fn session() -> Session {
    Session { token: "tok-123".into(), username: "ana".into() }
}

#[tokio::test]
async fn login_posts_credentials_and_maps_session() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(serde_json::json!({"username":"ana","password":"pw"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"tok-123","user":{"id":1,"username":"ana"}}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let session = api.login("ana", "pw").await.expect("login should succeed");

    mock.assert_async().await;
    assert_eq!(session.token, "tok-123");
    assert_eq!(session.username, "ana");
}

#[tokio::test]
async fn bad_credentials_surface_as_auth_error_with_server_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let err = api.login("ana", "nope").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.banner("Authentication failed"), "Invalid credentials");
}

#[tokio::test]
async fn register_hits_register_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"fresh","user":{"username":"bo"}}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let session = api.register("bo", "pw").await.unwrap();

    mock.assert_async().await;
    assert_eq!(session.username, "bo");
}

#[tokio::test]
async fn fetch_matches_sends_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/matches")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":1,"home_team_id":10,"away_team_id":11,"home_team_name":"Mexico",
                 "away_team_name":"Canada","kickoff_at":"2026-06-11T19:00:00Z",
                 "stage":"Group A","result_home":1,"result_away":1},
                {"id":2,"home_team_id":12,"away_team_id":13,"home_team_name":"USA",
                 "away_team_name":"Wales","kickoff_at":"2026-06-12T01:00:00Z",
                 "stage":"Group B","result_home":null,"result_away":null}]"#,
        )
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let matches = api.fetch_matches(&session()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(matches.len(), 2);
    assert!(matches[0].is_finished());
    assert!(!matches[1].is_finished());
    assert_eq!(matches[1].away_team.name, "Wales");
}

#[tokio::test]
async fn malformed_match_payload_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/matches")
        .with_status(200)
        .with_header("content-type", "application/json")
        // kickoff_at missing
        .with_body(r#"[{"id":1,"home_team_id":10,"away_team_id":11,"home_team_name":"A","away_team_name":"B","stage":"Group A"}]"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let err = api.fetch_matches(&session()).await.unwrap_err();
    assert!(matches!(err, ApiError::Parsing(..)), "got {err}");
}

#[tokio::test]
async fn fetch_my_predictions_maps_wire_names() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/predictions/mine")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"match_id":4,"predicted_home":3,"predicted_away":0}]"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let preds = api.fetch_my_predictions(&session()).await.unwrap();
    assert_eq!(preds, vec![Prediction::new(4, 3, 0)]);
}

#[tokio::test]
async fn save_predictions_posts_bulk_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/predictions/bulk")
        .match_header("authorization", "Bearer tok-123")
        .match_body(Matcher::Json(serde_json::json!({
            "predictions": [
                {"matchId": 1, "home": 2, "away": 0},
                {"matchId": 5, "home": 2, "away": 1}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    api.save_predictions(&session(), &[Prediction::new(1, 2, 0), Prediction::new(5, 2, 1)])
        .await
        .expect("bulk save should be acknowledged");
    mock.assert_async().await;
}

#[tokio::test]
async fn save_failure_carries_server_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/predictions/bulk")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Prediction window closed"}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let err = api.save_predictions(&session(), &[Prediction::new(1, 0, 0)]).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 400, .. }));
    assert_eq!(err.banner("Failed to save predictions"), "Prediction window closed");
}

#[tokio::test]
async fn server_error_without_body_uses_fallback_banner() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/predictions/points")
        .with_status(500)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let err = api.fetch_points(&session()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.banner("Failed to load data from server"), "Failed to load data from server");
}

#[tokio::test]
async fn fetch_points_builds_breakdown() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/predictions/points")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"totalPoints":10,"perMatch":[{"matchId":1,"points":7},{"matchId":2,"points":3}]}"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let points = api.fetch_points(&session()).await.unwrap();
    assert_eq!(points.total, 10);
    assert_eq!(points.points_for(1), Some(7));
    assert_eq!(points.points_for(2), Some(3));
}

#[tokio::test]
async fn boards_are_mapped() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/users/leaderboard")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"userId":2,"username":"bo","totalPoints":21},{"userId":1,"username":"ana","totalPoints":14}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/groups/standings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"group":"A","team":"Mexico","goalsFor":4,"goalsAgainst":1,"points":7}]"#)
        .create_async()
        .await;

    let api = ScorecastApi::new(server.url());
    let board = api.fetch_leaderboard(&session()).await.unwrap();
    assert_eq!(board[0].username, "bo");
    assert_eq!(board[1].total_points, 14);

    let standings = api.fetch_group_standings(&session()).await.unwrap();
    assert_eq!(standings[0].goal_difference(), 3);
}
