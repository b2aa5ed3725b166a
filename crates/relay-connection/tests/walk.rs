use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::watch;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use relay_connection::nodes::{Program, ProgramFilter, Subject, SubjectFilter};
use relay_connection::{
    ConnectionClient, ConnectionClientConfig, ConnectionError, ConnectionFilter,
    ConnectionRegistry, PageSizeLimits, StringFilter,
};
use relay_graphql::{GraphqlClientError, OperatorContext};
use relay_testkit::fixtures::{connection_page, cursor, envelope, linear_pages, page_info};
use relay_testkit::{MockConnectionServer, init_test_tracing, init_test_tracing_silent};

const PROGRAMS: &str = "programsConnection";

#[derive(Debug, Default, Serialize)]
struct ClassFilter {}

impl ConnectionFilter for ClassFilter {
    const FILTER_TYPE: &'static str = "class";
}

fn program(i: usize) -> Value {
    json!({
        "id": format!("prog-{i}"),
        "name": format!("Badanamu {i}"),
        "status": "active",
        "system": i % 2 == 0,
    })
}

fn bada() -> ProgramFilter {
    ProgramFilter {
        name: Some(StringFilter::contains("Bada")),
        ..ProgramFilter::default()
    }
}

fn client_for(server: &MockConnectionServer) -> ConnectionClient {
    let config = ConnectionClientConfig::new(server.uri());
    ConnectionClient::from_config(&config, ConnectionRegistry::with_defaults().expect("defaults"))
        .expect("client")
}

#[tokio::test]
async fn two_page_walk_delivers_pages_in_cursor_order() {
    init_test_tracing();
    let server = MockConnectionServer::start().await;
    server.serve_pages(PROGRAMS, linear_pages(4, 2, program)).await;
    let client = client_for(&server);

    let mut seen_cursors = Vec::new();
    let mut calls = 0;
    let summary = client
        .walk::<_, Program, _, ConnectionError>(
            &OperatorContext::new("token"),
            &bada(),
            |page| {
                calls += 1;
                seen_cursors.extend(page.edges.iter().map(|edge| edge.cursor.clone()));
                Ok(())
            },
        )
        .await
        .expect("walk");

    assert_eq!(calls, 2);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.edges, 4);
    assert_eq!(summary.total_count, Some(4));
    assert!(seen_cursors.windows(2).all(|pair| pair[0] < pair[1]));

    let bodies = server.received_bodies().await;
    assert_eq!(bodies.len(), 2);
    let query = bodies[0]["query"].as_str().expect("query text");
    assert!(query.contains(r#"name: {operator: contains, value: "Bada"}"#));
    assert!(query.contains("id name status system"));
    assert_eq!(bodies[0]["query"], bodies[1]["query"]);
    assert_eq!(bodies[0]["variables"]["direction"], "FORWARD");
    assert_eq!(
        server.received_cursors().await,
        vec![String::new(), cursor(1)]
    );
}

#[tokio::test]
async fn handler_runs_exactly_once_per_page() {
    init_test_tracing();
    let server = MockConnectionServer::start().await;
    server.serve_pages(PROGRAMS, linear_pages(7, 2, program)).await;
    let client = client_for(&server).with_page_size(2);

    let mut calls = 0;
    let summary = client
        .walk::<_, Program, _, ConnectionError>(&OperatorContext::anonymous(), &bada(), |_| {
            calls += 1;
            Ok(())
        })
        .await
        .expect("walk");

    assert_eq!(calls, 4);
    assert_eq!(summary.edges, 7);
    assert_eq!(server.received_bodies().await.len(), 4);
}

#[tokio::test]
async fn unregistered_filter_is_unsupported_without_network() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server.inner())
        .await;
    let client = client_for(&server);

    let err = client
        .collect_nodes::<_, Program>(&OperatorContext::anonymous(), &ClassFilter::default())
        .await
        .expect_err("class is not registered");

    assert!(err.is_unsupported());
    assert_eq!(client.graphql().metrics().requests_total, 0);
}

#[tokio::test]
async fn collect_nodes_gathers_every_page() {
    init_test_tracing();
    let server = MockConnectionServer::start().await;
    server.serve_pages(PROGRAMS, linear_pages(5, 2, program)).await;
    let client = client_for(&server);

    let programs = client
        .collect_nodes::<_, Program>(&OperatorContext::anonymous(), &bada())
        .await
        .expect("collect");

    let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["prog-0", "prog-1", "prog-2", "prog-3", "prog-4"]);
    assert!(programs[0].system);
    assert!(!programs[1].system);
}

#[tokio::test]
async fn empty_connection_is_a_single_page() {
    init_test_tracing();
    let server = MockConnectionServer::start().await;
    server
        .serve_pages("subjectsConnection", linear_pages(0, 10, |_| json!({})))
        .await;
    let client = client_for(&server);

    let subjects = client
        .collect_nodes::<_, Subject>(&OperatorContext::anonymous(), &SubjectFilter::default())
        .await
        .expect("collect");

    assert!(subjects.is_empty());
    let bodies = server.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert!(!bodies[0]["query"].as_str().unwrap_or_default().contains("filter:"));
}

#[tokio::test]
async fn handler_error_aborts_the_walk() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    server.serve_pages(PROGRAMS, linear_pages(6, 2, program)).await;
    let client = client_for(&server);

    let mut calls = 0;
    let err = client
        .walk::<_, Program, _, std::io::Error>(&OperatorContext::anonymous(), &bada(), |_| {
            calls += 1;
            Err(std::io::Error::other("sink full"))
        })
        .await
        .expect_err("handler failure must abort");

    assert_eq!(calls, 1);
    match err {
        ConnectionError::Handler(source) => assert_eq!(source.to_string(), "sink full"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.received_bodies().await.len(), 1);
}

#[tokio::test]
async fn server_error_propagates_verbatim() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    server.fail_with(500, "boom").await;
    let client = client_for(&server);

    let mut calls = 0;
    let err = client
        .walk::<_, Program, _, ConnectionError>(&OperatorContext::anonymous(), &bada(), |_| {
            calls += 1;
            Ok(())
        })
        .await
        .expect_err("500 must fail");

    assert_eq!(calls, 0);
    match err {
        ConnectionError::Transport(GraphqlClientError::HttpStatus { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.received_bodies().await.len(), 1);
}

#[tokio::test]
async fn missing_connection_key_is_reported() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    server
        .serve_pages("subjectsConnection", linear_pages(1, 1, program))
        .await;
    let client = client_for(&server);

    let err = client
        .collect_nodes::<_, Program>(&OperatorContext::anonymous(), &bada())
        .await
        .expect_err("wrong envelope key");

    assert!(matches!(
        err,
        ConnectionError::MissingConnection { ref connection } if connection == PROGRAMS
    ));
}

#[tokio::test]
async fn empty_continuation_cursor_stalls_instead_of_looping() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    let stuck = connection_page(
        10,
        page_info(true, false, "", ""),
        vec![(cursor(0), program(0))],
    );
    server.serve_pages(PROGRAMS, vec![stuck]).await;
    let client = client_for(&server);

    let err = client
        .collect_nodes::<_, Program>(&OperatorContext::anonymous(), &bada())
        .await
        .expect_err("empty continuation cursor");

    assert!(matches!(err, ConnectionError::StalledCursor { .. }));
    assert_eq!(server.received_bodies().await.len(), 1);
}

#[tokio::test]
async fn cursor_cycle_stalls_instead_of_looping() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    let page = |start: &str, end: &str, i: usize| {
        connection_page(
            10,
            page_info(true, !start.is_empty(), start, end),
            vec![(end.to_string(), program(i))],
        )
    };
    // "" -> A, A -> B, B -> A
    server
        .serve_pages(
            PROGRAMS,
            vec![page("", "A", 0), page("A", "B", 1), page("B", "A", 2)],
        )
        .await;
    let client = client_for(&server);

    let mut calls = 0;
    let err = client
        .walk::<_, Program, _, ConnectionError>(&OperatorContext::anonymous(), &bada(), |_| {
            calls += 1;
            Ok(())
        })
        .await
        .expect_err("cycling cursors must stop");

    assert!(matches!(err, ConnectionError::StalledCursor { ref cursor } if cursor == "A"));
    assert_eq!(calls, 3);
    assert_eq!(
        server.received_cursors().await,
        vec![String::new(), "A".to_string(), "B".to_string()]
    );
}

#[tokio::test]
async fn page_size_is_clamped_in_variables() {
    init_test_tracing();
    let server = MockConnectionServer::start().await;
    server.serve_pages(PROGRAMS, linear_pages(1, 1, program)).await;
    let client = client_for(&server)
        .with_page_size_limits(PageSizeLimits { default: 10, max: 25 })
        .with_page_size(1_000);

    client
        .collect_nodes::<_, Program>(&OperatorContext::anonymous(), &bada())
        .await
        .expect("collect");

    let bodies = server.received_bodies().await;
    assert_eq!(bodies[0]["variables"]["count"], 25);
}

#[tokio::test]
async fn cancellation_mid_walk_returns_cancelled() {
    init_test_tracing_silent();
    let server = MockConnectionServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(PROGRAMS, linear_pages(1, 1, program).remove(0)))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(server.inner())
        .await;
    let client = client_for(&server);

    let (tx, rx) = watch::channel(false);
    let ctx = OperatorContext::new("token").with_cancellation(rx);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = tx.send(true);
    });

    let err = client
        .collect_nodes::<_, Program>(&ctx, &bada())
        .await
        .expect_err("cancelled walk");

    assert!(err.is_cancelled());
    assert_eq!(client.graphql().metrics().requests_cancelled, 1);
}
