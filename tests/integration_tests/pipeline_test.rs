//! End-to-end collection tests
//!
//! Runs the collector against a mock API and checks the CSV it produces.

use std::time::Duration;
use tempfile::TempDir;
use vkwall::crawler::{Collector, GroupOutcome, WallFetcher};
use vkwall::storage::HEADER;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_error, test_config_with_output, wall_page};

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[tokio::test]
async fn test_collects_multiple_communities_in_order() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("posts.csv");

    Mock::given(method("GET"))
        .and(path("/method/wall.get"))
        .and(query_param("owner_id", "-11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(50, 3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/method/wall.get"))
        .and(query_param("owner_id", "-22"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(900, 2)))
        .mount(&mock_server)
        .await;

    let mut config = test_config_with_output(&mock_server.uri(), &output);
    config.collector.group_ids = vec![11, 22];

    let report = Collector::new(config).unwrap().run().await.unwrap();

    assert_eq!(
        report.outcomes,
        vec![
            GroupOutcome::Collected {
                group_id: 11,
                posts: 3
            },
            GroupOutcome::Collected {
                group_id: 22,
                posts: 2
            },
        ]
    );
    assert_eq!(report.total_posts(), 5);

    let (headers, rows) = read_rows(&output);
    assert_eq!(headers, HEADER.to_vec());
    assert_eq!(rows.len(), 5);

    assert_eq!(&rows[0][0], "50");
    assert_eq!(&rows[0][1], "https://vk.com/wall-11_50");
    assert_eq!(&rows[0][2], "Post number 50 #news");
    assert_eq!(&rows[0][3], "2024-01-15T06:30:00");
    assert_eq!(&rows[0][4], "11");
    assert_eq!(&rows[0][5], "3");
    assert_eq!(&rows[0][6], "1");
    assert_eq!(&rows[0][7], "0");
    assert_eq!(&rows[0][8], "#news");
    assert_eq!(&rows[0][9], "attachments:photo_text");
    assert_eq!(&rows[0][10], "20");
    assert_eq!(&rows[0][11], "morning");

    assert_eq!(&rows[3][4], "22");
    assert_eq!(&rows[4][0], "899");
}

#[tokio::test]
async fn test_output_is_fully_quoted() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("quoted.csv");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(1, 1)))
        .mount(&mock_server)
        .await;

    let mut config = test_config_with_output(&mock_server.uri(), &output);
    config.collector.group_ids = vec![5];

    Collector::new(config).unwrap().run().await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let mut lines = content.split("\r\n");
    assert!(lines.next().unwrap().starts_with("\"Post ID\",\"Post Link\""));
    assert_eq!(
        lines.next().unwrap(),
        "\"1\",\"https://vk.com/wall-5_1\",\"Post number 1 #news\",\"2024-01-15T06:30:00\",\
         \"5\",\"3\",\"1\",\"0\",\"#news\",\"attachments:photo_text\",\"19\",\"morning\""
    );
}

#[tokio::test]
async fn test_failing_community_does_not_abort_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("posts.csv");

    // community 1: error payload, nothing collected
    Mock::given(method("GET"))
        .and(query_param("owner_id", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_error(15, "Access denied")))
        .mount(&mock_server)
        .await;

    // community 2: hangs past the request timeout
    Mock::given(method("GET"))
        .and(query_param("owner_id", "-2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(wall_page(10, 10))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    // community 3: healthy
    Mock::given(method("GET"))
        .and(query_param("owner_id", "-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(30, 4)))
        .mount(&mock_server)
        .await;

    let mut config = test_config_with_output(&mock_server.uri(), &output);
    config.collector.group_ids = vec![1, 2, 3];
    config.api.request_timeout_secs = 1;

    let report = Collector::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.outcomes[0], GroupOutcome::Empty { group_id: 1 });
    assert!(report.outcomes[1].is_failed());
    assert_eq!(report.outcomes[1].group_id(), 2);
    assert_eq!(
        report.outcomes[1],
        GroupOutcome::Failed {
            group_id: 2,
            reason: "Fetch error: Request timeout".to_string()
        }
    );
    assert_eq!(
        report.outcomes[2],
        GroupOutcome::Collected {
            group_id: 3,
            posts: 4
        }
    );

    let (_, rows) = read_rows(&output);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| &r[4] == "3"));
}

#[tokio::test]
async fn test_quota_applies_per_community() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("posts.csv");

    Mock::given(method("GET"))
        .and(query_param("count", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(100, 7)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = test_config_with_output(&mock_server.uri(), &output);
    config.collector.group_ids = vec![1, 2];
    config.collector.posts_per_group = 7;

    let report = Collector::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.total_posts(), 14);
}

#[tokio::test]
async fn test_no_communities_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("empty.csv");

    let config = test_config_with_output("http://127.0.0.1:1", &output);
    let report = Collector::new(config).unwrap().run().await.unwrap();

    assert!(report.outcomes.is_empty());
    let (headers, rows) = read_rows(&output);
    assert_eq!(headers.len(), 12);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_with_custom_fetcher() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("posts.csv");

    Mock::given(method("GET"))
        .and(path("/proxy/method/wall.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wall_page(3, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config_with_output("https://api.vk.com", &output);
    config.collector.group_ids = vec![9];

    let fetcher =
        WallFetcher::with_base_url(&format!("{}/proxy", mock_server.uri()), &config).unwrap();
    let report = Collector::with_fetcher(config, fetcher).run().await.unwrap();

    assert_eq!(report.total_posts(), 2);
}
