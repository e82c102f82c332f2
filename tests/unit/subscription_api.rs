use ig_realtime::transport::http_client::InstagramHttpClient;
use ig_realtime::utils::logger::setup_logger;
use ig_realtime::{InstagramSubscription, SubscriptionError, SubscriptionService};
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn subscription(server: &ServerGuard) -> InstagramSubscription<InstagramHttpClient> {
    let client = InstagramHttpClient::new(Duration::from_secs(5)).unwrap();
    InstagramSubscription::new(Arc::new(client))
        .api_base(&server.url())
        .unwrap()
        .client_id("test_client")
        .unwrap()
        .client_secret("test_secret")
        .unwrap()
        .verify_token("test_token")
        .unwrap()
        .callback("https://example.com/hook")
        .unwrap()
}

#[tokio::test]
async fn test_create_tag_subscription_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/subscriptions/")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("client_id".into(), "test_client".into()),
            Matcher::UrlEncoded("client_secret".into(), "test_secret".into()),
            Matcher::UrlEncoded("object".into(), "tag".into()),
            Matcher::UrlEncoded("object_id".into(), "nofilter".into()),
            Matcher::UrlEncoded("aspect".into(), "media".into()),
            Matcher::UrlEncoded("verify_token".into(), "test_token".into()),
            Matcher::UrlEncoded("callback_url".into(), "https://example.com/hook".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meta":{"code":200},"data":{"id":"1","type":"subscription","object":"tag","object_id":"nofilter","aspect":"media","callback_url":"https://example.com/hook"}}"#,
        )
        .create_async()
        .await;

    let created = subscription(&server)
        .create_tag_subscription("nofilter")
        .await
        .unwrap();

    assert_eq!(created.id(), "1");
    assert_eq!(created.data.object_id.as_deref(), Some("nofilter"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_subscriptions_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/subscriptions/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("client_id".into(), "test_client".into()),
            Matcher::UrlEncoded("client_secret".into(), "test_secret".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"meta":{"code":200},"data":[{"id":"1","object":"user"},{"id":"2","object":"geography","lat":1.5,"lng":2.5,"radius":800}]}"#)
        .create_async()
        .await;

    let list = subscription(&server).get_subscription_list().await.unwrap();

    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[1].radius, Some(800));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_all_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("DELETE", "/subscriptions/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("client_id".into(), "test_client".into()),
            Matcher::UrlEncoded("object".into(), "all".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"meta":{"code":200},"data":null}"#)
        .create_async()
        .await;

    subscription(&server).delete_all_subscriptions().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_recent_media_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/geographies/geo1/media/recent")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("client_id".into(), "test_client".into()),
            Matcher::UrlEncoded("min_id".into(), "999".into()),
            Matcher::UrlEncoded("count".into(), "20".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"meta":{"code":200},"data":[{"id":"m1","type":"image","created_time":"1296656006"}],"pagination":{"next_min_id":"1000"}}"#)
        .create_async()
        .await;

    let feed = subscription(&server)
        .get_recent_media_by_geography("geo1", Some("999"), Some(20))
        .await
        .unwrap();

    assert_eq!(feed.data[0].id, "m1");
    assert!(feed.data[0].created_at().is_some());
    assert_eq!(
        feed.pagination.and_then(|p| p.next_min_id).as_deref(),
        Some("1000")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/subscriptions/")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(r#"{"meta":{"error_type":"OAuthRateLimitException","code":503,"error_message":"The maximum number of requests per hour has been exceeded."}}"#)
        .create_async()
        .await;

    let err = subscription(&server).get_subscription_list().await.unwrap_err();

    assert!(err.is_rate_limited());
    assert!(err.to_string().contains("OAuthRateLimitException"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_status_end_to_end() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("DELETE", "/subscriptions/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("server exploded")
        .create_async()
        .await;

    match subscription(&server).delete_subscription_by_id(42).await {
        Err(SubscriptionError::UnknownResponse { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "server exploded");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_happens_before_any_request() {
    setup_logger();
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/subscriptions/")
        .expect(0)
        .create_async()
        .await;

    let client = InstagramHttpClient::new(Duration::from_secs(5)).unwrap();
    let bare = InstagramSubscription::new(Arc::new(client))
        .api_base(&server.url())
        .unwrap()
        .client_id("test_client")
        .unwrap();

    let result = bare.create_user_subscription().await;

    assert!(matches!(result, Err(SubscriptionError::Validation(_))));
    mock.assert_async().await;
}
