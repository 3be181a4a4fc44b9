use std::sync::{Arc, Mutex};

use fyyur_cli::{Cli, delete_venues, render_outcome};
use fyyur_client::Navigator;
use fyyur_client::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct Location(Mutex<Vec<String>>);

impl Navigator for Location {
    fn navigate(&self, url: &str) {
        self.0.lock().unwrap().push(url.to_string());
    }
}

#[tokio::test]
async fn delete_venues_against_mock_site() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/venues/7"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/venues/8"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        base_url: server.uri(),
        ..Config::default()
    };
    let location = Arc::new(Location::default());
    let ids = vec!["7".to_string(), "8".to_string()];
    let outcomes = delete_venues(&config, &ids, location.clone())
        .await
        .expect("outcomes");

    let lines: Vec<String> = ids
        .iter()
        .zip(&outcomes)
        .map(|(id, o)| render_outcome(id, o, false))
        .collect();
    assert_eq!(
        lines,
        vec![
            format!("venue 7: redirected to {}/", server.uri()),
            "venue 8: status 404".to_string(),
        ]
    );
    assert_eq!(*location.0.lock().unwrap(), vec![format!("{}/", server.uri())]);
    server.verify().await;
}

#[tokio::test]
async fn run_parse_date_has_no_side_effects() {
    use clap::Parser;
    let cli = Cli::try_parse_from(["fyyur", "parse-date", "2023-06-15T10:30:00.000Z"]).unwrap();
    let lines = fyyur_cli::run(cli).await.expect("run");
    assert_eq!(lines, vec!["2023-06-15T10:30:00.000Z".to_string()]);
}
