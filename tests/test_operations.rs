mod common;

use ddb_client::client::{
    ErrorKind, Meal, MealPlanTaskStatus, MealPlanTaskStatusChangeRequestInput, Pagination,
    QueryFilter, RequestOptions, ValidIngredientGroup,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_meal() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_123"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data":{"id":"m_123","name":"Soup"},"pagination":null,"error":null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let meal = client
        .get_meal("m_123", &RequestOptions::default())
        .await
        .expect("Failed to get meal");

    assert_eq!(
        meal,
        Meal {
            id: "m_123".to_string(),
            name: "Soup".to_string(),
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn test_list_without_filter_uses_defaults() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meal_plans/mp_1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_envelope(json!([]), 1, 50, 0)))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let tasks = client
        .get_meal_plan_tasks("mp_1", None, &RequestOptions::default())
        .await
        .expect("Failed to list meal plan tasks");

    assert!(tasks.is_empty());
    assert_eq!(
        tasks.pagination,
        Pagination {
            page: 1,
            limit: 50,
            total_count: Some(0),
            filtered_count: None,
        }
    );

    let requests = common::received(&server).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("limit=50&page=1&sortBy=asc"));
}

#[tokio::test]
async fn test_search_sets_query_in_key_order() {
    common::init_test_logging();
    let server = MockServer::start().await;

    let groups = json!([
        {"id": "vig_1", "name": "Alliums", "slug": "alliums"},
        {"id": "vig_2", "name": "Sweet onions", "slug": "sweet-onions"},
    ]);
    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredient_groups/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_envelope(groups, 1, 50, 2)))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let result = client
        .search_for_valid_ingredient_groups("onion", None, &RequestOptions::default())
        .await
        .expect("Failed to search ingredient groups");

    let ids: Vec<String> = result.data.iter().map(|g: &ValidIngredientGroup| g.id.clone()).collect();
    assert_eq!(ids, vec!["vig_1", "vig_2"]);
    assert_eq!(result.pagination.total_count, Some(2));

    let requests = common::received(&server).await;
    assert_eq!(requests[0].url.query(), Some("limit=50&page=1&q=onion&sortBy=asc"));
}

#[tokio::test]
async fn test_explicit_filter_is_clamped_and_encoded() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_envelope(json!([]), 3, 250, 0)))
        .mount(&server)
        .await;

    let filter = QueryFilter::new()
        .with_page(3)
        .with_limit(1_000)
        .with_include_archived(true);

    let client = common::client_for(&server);
    client
        .get_meals(&filter, &RequestOptions::default())
        .await
        .expect("Failed to list meals");

    let requests = common::received(&server).await;
    assert_eq!(
        requests[0].url.query(),
        Some("includeArchived=true&limit=250&page=3&sortBy=asc")
    );
}

#[tokio::test]
async fn test_empty_id_is_never_dispatched() {
    let client = common::offline_client();
    let err = client
        .archive_meal("", &RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidIdProvided);
    assert!(err.kind().is_caller_error());
}

#[tokio::test]
async fn test_nil_input_is_never_dispatched() {
    let client = common::offline_client();
    let err = client
        .create_meal(None, &RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NilInputProvided);
}

#[tokio::test]
async fn test_empty_search_query_is_never_dispatched() {
    let client = common::offline_client();
    let opts = RequestOptions::default();

    let kinds = [
        client.search_for_meals("", None, &opts).await.unwrap_err().kind(),
        client.search_for_recipes("", None, &opts).await.unwrap_err().kind(),
        client.search_for_users("", None, &opts).await.unwrap_err().kind(),
        client.search_for_service_settings("", None, &opts).await.unwrap_err().kind(),
    ];
    assert!(kinds.iter().all(|k| *k == ErrorKind::EmptyQueryProvided));
}

#[tokio::test]
async fn test_remote_error_is_surfaced() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_123"))
        .respond_with(ResponseTemplate::new(403).set_body_json(common::error_envelope("forbidden", "not allowed")))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .get_meal("m_123", &RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.remote_code(), Some("forbidden"));
    assert_eq!(err.to_string(), "remote error forbidden: not allowed");
}

#[tokio::test]
async fn test_remote_error_wins_over_data_on_lists() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "r_1"}],
            "error": {"code": "quota_exceeded", "message": "slow down"},
        })))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .get_recipes(None, &RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.remote_code(), Some("quota_exceeded"));
}

#[tokio::test]
async fn test_unexpected_status_carries_the_status_code() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/households/current"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let err = client
        .get_active_household(&RequestOptions::default())
        .await
        .unwrap_err();

    match err {
        ddb_client::ClientError::Transport(transport) => assert_eq!(transport.status(), Some(502)),
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_sends_json_body() {
    common::init_test_logging();
    let server = MockServer::start().await;
    let input = common::meal_creation_input();

    Mock::given(method("POST"))
        .and(path("/api/v1/meals"))
        .and(header("content-type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::envelope(json!({
            "id": "m_9",
            "name": "Soup night",
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let meal = client
        .create_meal(&input, &RequestOptions::default())
        .await
        .expect("Failed to create meal");
    assert_eq!(meal.id, "m_9");
}

#[tokio::test]
async fn test_status_change_uses_patch_and_returns_nothing() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/meal_plans/mp_1/tasks/t_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({"id": "t_1"}))))
        .expect(1)
        .mount(&server)
        .await;

    let change = MealPlanTaskStatusChangeRequestInput {
        status: Some(MealPlanTaskStatus::Finished),
        status_explanation: "done early".to_string(),
        assigned_to_user: None,
    };

    let client = common::client_for(&server);
    client
        .update_meal_plan_task_status("mp_1", "t_1", &change, &RequestOptions::default())
        .await
        .expect("Failed to change task status");
}

#[tokio::test]
async fn test_ids_are_percent_encoded() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({"id": "m 1/2"}))))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client
        .get_meal("m 1/2", &RequestOptions::default())
        .await
        .expect("Failed to get meal");

    let requests = common::received(&server).await;
    assert_eq!(requests[0].url.path(), "/api/v1/meals/m%201%2F2");
}

#[tokio::test]
async fn test_reads_and_archives_are_idempotent() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({
            "id": "r_1",
            "name": "Stock",
            "steps": [{"id": "s_1", "index": 0}],
        }))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/recipes/r_1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(common::envelope(json!(null))))
        .expect(2)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let opts = RequestOptions::default();

    let first = client.get_recipe("r_1", &opts).await.expect("first read");
    let second = client.get_recipe("r_1", &opts).await.expect("second read");
    assert_eq!(first, second);

    let first = client.archive_recipe("r_1", &opts).await.expect("first archive");
    let second = client.archive_recipe("r_1", &opts).await.expect("second archive");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!({"id": "m_1"}))))
        .expect(8)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_meal("m_1", &RequestOptions::default()).await })
        })
        .collect();

    for handle in handles {
        let meal = handle.await.expect("task panicked").expect("Failed to get meal");
        assert_eq!(meal.id, "m_1");
    }
}

#[tokio::test]
async fn test_null_collections_decode_as_empty() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals/m_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "m_1", "name": "Soup", "components": null},
            "error": null,
        })))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let meal = client
        .get_meal("m_1", &RequestOptions::default())
        .await
        .expect("Failed to get meal");

    assert_eq!(meal.name, "Soup");
    assert!(meal.components.is_empty());
}

#[tokio::test]
async fn test_list_ignores_the_filter_search_term() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_envelope(json!([]), 1, 50, 0)))
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    client
        .get_meals(&QueryFilter::new().with_search("soup"), &RequestOptions::default())
        .await
        .expect("Failed to list meals");

    let requests = common::received(&server).await;
    assert_eq!(requests[0].url.query(), Some("limit=50&page=1&sortBy=asc"));
}

#[tokio::test]
async fn test_search_query_overrides_the_filter_search_term() {
    common::init_test_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meals/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_envelope(json!([]), 1, 50, 0)))
        .mount(&server)
        .await;

    let filter = QueryFilter::new().with_search("stew");
    let client = common::client_for(&server);
    client
        .search_for_meals("soup", &filter, &RequestOptions::default())
        .await
        .expect("Failed to search meals");

    let requests = common::received(&server).await;
    assert_eq!(requests[0].url.query(), Some("limit=50&page=1&q=soup&sortBy=asc"));
}
