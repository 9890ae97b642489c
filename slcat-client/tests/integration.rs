//! End-to-end tests driving the runner against mock catalog servers.

use std::time::{Duration, Instant};

use slcat_rs_client::mock::{MockConfig, MockServer};
use slcat_rs_client::{ClientConfig, QueryError, QueryRunner, ResultCache, Target};

fn quick_config() -> ClientConfig {
    ClientConfig {
        connect_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_millis(300),
    }
}

fn runner(window: Duration) -> QueryRunner {
    QueryRunner::new(quick_config(), ResultCache::new(window))
}

#[tokio::test]
async fn resolves_multiple_targets_sequentially() {
    let a = MockServer::start(MockConfig::catalog(vec![
        "NL  HGN    Heerlen-Mechelen".to_owned(),
    ]))
    .await;
    let b = MockServer::start(MockConfig::catalog(vec![
        "IU  ANMO   Albuquerque, New Mexico".to_owned(),
        "GE  WLF    Walferdange, Luxembourg".to_owned(),
    ]))
    .await;

    let targets = vec![
        Target::parse(&a.addr().to_string()).unwrap(),
        Target::parse(&b.addr().to_string()).unwrap(),
    ];

    let results = runner(Duration::from_secs(60)).run(&targets).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].target_id, targets[0].id);
    assert_eq!(results[0].stations.len(), 1);
    assert_eq!(results[1].stations.len(), 2);
    assert_eq!(results[1].stations[0].station, "ANMO");
}

#[tokio::test]
async fn cached_target_skips_the_network() {
    let server = MockServer::start(MockConfig::catalog(vec![
        "NL  HGN    Heerlen-Mechelen".to_owned(),
    ]))
    .await;
    let target = Target::parse(&server.addr().to_string()).unwrap();
    let mut runner = runner(Duration::from_secs(60));

    let first = runner.run(std::slice::from_ref(&target)).await;
    assert!(first[0].is_ok());
    let fetched_at = first[0].fetched_at;

    // The mock serves a single connection; a second live handshake would
    // fail, so a matching result proves the cache answered.
    let second = runner.run(std::slice::from_ref(&target)).await;
    assert!(second[0].is_ok());
    assert_eq!(second[0].fetched_at, fetched_at);
    assert_eq!(second[0].stations, first[0].stations);
}

#[tokio::test]
async fn stale_cache_entry_triggers_a_refetch() {
    let server = MockServer::start(MockConfig::catalog(vec![
        "NL  HGN    Heerlen-Mechelen".to_owned(),
    ]))
    .await;
    let target = Target::parse(&server.addr().to_string()).unwrap();
    // Zero window: every entry is stale at read time.
    let mut runner = runner(Duration::ZERO);

    let first = runner.run(std::slice::from_ref(&target)).await;
    assert!(first[0].is_ok());

    // The single-connection mock is gone now, so the forced refetch fails —
    // and the failure overwrites the cached success (last-write-wins).
    let second = runner.run(std::slice::from_ref(&target)).await;
    assert_eq!(second[0].error, Some(QueryError::ConnectionRefused));
}

#[tokio::test]
async fn mixed_cached_and_live_targets() {
    let live = MockServer::start(MockConfig::catalog(vec![
        "GE  WLF    Walferdange, Luxembourg".to_owned(),
    ]))
    .await;

    let cached_target = Target::parse("cached.example.org:18000").unwrap();
    let live_target = Target::parse(&live.addr().to_string()).unwrap();

    // Seed the cache by serving the cached target once from its own mock.
    let seed = MockServer::start(MockConfig::catalog(vec![
        "NL  HGN    Heerlen-Mechelen".to_owned(),
    ]))
    .await;
    let mut runner = runner(Duration::from_secs(60));
    let seeded = runner
        .run(&[Target {
            host: seed.addr().ip().to_string(),
            port: seed.addr().port(),
            id: cached_target.id.clone(),
        }])
        .await;
    assert!(seeded[0].is_ok());

    // Now resolve both: the first comes untouched from the cache (its host
    // does not resolve, so any network attempt would error), the second
    // from a live handshake.
    let results = runner.run(&[cached_target, live_target]).await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[0].stations[0].station, "HGN");
    assert_eq!(results[0].fetched_at, seeded[0].fetched_at);
    assert!(results[1].is_ok());
    assert_eq!(results[1].stations[0].network, "GE");
}

#[tokio::test]
async fn one_failure_never_aborts_the_rest() {
    let refused = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    };
    let unsupported = MockServer::start(MockConfig::unsupported()).await;
    let good = MockServer::start(MockConfig::catalog(vec![
        "NL  HGN    Heerlen-Mechelen".to_owned(),
    ]))
    .await;

    let targets = vec![
        Target::parse(&refused.to_string()).unwrap(),
        Target::parse(&unsupported.addr().to_string()).unwrap(),
        Target::parse(&good.addr().to_string()).unwrap(),
    ];

    let results = runner(Duration::from_secs(60)).run(&targets).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].error, Some(QueryError::ConnectionRefused));
    assert!(!results[0].connected);
    assert_eq!(results[1].error, Some(QueryError::CatNotImplemented));
    assert!(results[1].connected);
    assert!(results[2].is_ok());
    assert_eq!(results[2].stations.len(), 1);
}

#[tokio::test]
async fn every_attempt_is_stamped_and_cached() {
    let server = MockServer::start(MockConfig::unsupported()).await;
    let target = Target::parse(&server.addr().to_string()).unwrap();
    let mut runner = runner(Duration::from_secs(60));

    let before = Instant::now();
    let results = runner.run(std::slice::from_ref(&target)).await;
    assert!(results[0].fetched_at >= before);

    // Error results are cached like successes.
    let hit = runner.cache().get(&target.id).expect("entry cached");
    assert_eq!(hit.error, Some(QueryError::CatNotImplemented));
}
