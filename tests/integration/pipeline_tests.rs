// Listing walk, detail fan-out and merge against a mock catalog

use std::time::Duration;

use catalog_crawler::crawl::{DetailCollector, ListingWalker};
use catalog_crawler::{CrawlOptions, Crawler};
use wiremock::MockServer;

use super::*;

#[tokio::test]
async fn test_single_page_yields_one_stub_per_product() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let products = [("Laptop A", "/p/1"), ("Laptop B", "/p/2"), ("Laptop C", "/p/3")];
    mount_page(&server, "/laptops", listing_html(&products, None)).await;

    let fetcher = fetcher();
    let descriptor = descriptor();
    let stubs = ListingWalker::new(&fetcher, &descriptor, 20)
        .walk(&format!("{}/laptops", server.uri()))
        .await;

    assert_eq!(stubs.len(), 3);
    assert_eq!(stubs[1].title, "Laptop B");
    assert_eq!(stubs[1].product_url, format!("{}/p/2", server.uri()));
    assert_eq!(stubs[1].image_url, format!("{}/images/p/2.jpg", server.uri()));
    assert_eq!(request_paths(&server).await, vec!["/laptops"]);
    Ok(())
}

#[tokio::test]
async fn test_pagination_fetches_each_page_once() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/l/1", listing_html(&[("A", "/p/a")], Some("/l/2"))).await;
    mount_page(&server, "/l/2", listing_html(&[("B", "/p/b")], Some("/l/3"))).await;
    mount_page(&server, "/l/3", listing_html(&[("C", "/p/c")], Some("/l/4"))).await;
    mount_page(&server, "/l/4", listing_html(&[("D", "/p/d")], None)).await;

    let fetcher = fetcher();
    let descriptor = descriptor();
    let stubs = ListingWalker::new(&fetcher, &descriptor, 20)
        .walk(&format!("{}/l/1", server.uri()))
        .await;

    assert_eq!(stubs.len(), 4);
    assert_eq!(request_paths(&server).await, vec!["/l/1", "/l/2", "/l/3", "/l/4"]);
    Ok(())
}

#[tokio::test]
async fn test_listing_fetch_failure_ends_walk_with_partial_result() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(&server, "/l/1", listing_html(&[("A", "/p/a")], Some("/l/2"))).await;
    mount_status(&server, "/l/2", 503).await;

    let fetcher = fetcher();
    let descriptor = descriptor();
    let stubs = ListingWalker::new(&fetcher, &descriptor, 20)
        .walk(&format!("{}/l/1", server.uri()))
        .await;

    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].title, "A");
    Ok(())
}

#[tokio::test]
async fn test_detail_records_follow_input_order() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_slow_page(&server, "/p/1", detail_html(&[("Id", "1")]), Duration::from_millis(300)).await;
    mount_slow_page(&server, "/p/2", detail_html(&[("Id", "2")]), Duration::from_millis(150)).await;
    mount_page(&server, "/p/3", detail_html(&[("Id", "3")])).await;

    let urls: Vec<String> = (1..=3).map(|n| format!("{}/p/{}", server.uri(), n)).collect();
    let fetcher = fetcher();
    let descriptor = descriptor();
    let records = DetailCollector::new(&fetcher, &descriptor, 3)
        .collect_all(&urls)
        .await;

    let ids: Vec<&str> = records.iter().map(|r| r["Id"].as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_detail_page_drops_only_that_product() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/tablets",
        listing_html(&[("Tablet A", "/p/a"), ("Tablet B", "/p/b")], None),
    )
    .await;
    mount_page(&server, "/p/a", detail_html(&[("Battery:", "10 h")])).await;
    mount_status(&server, "/p/b", 500).await;

    let logs = LogCapture::default();
    let _subscriber = tracing::subscriber::set_default(logs.subscriber());

    let crawler = Crawler::new(
        fetcher(),
        descriptor(),
        CrawlOptions {
            max_pages: 20,
            max_concurrent_details: 2,
        },
    );
    let report = crawler.crawl_listing(&format!("{}/tablets", server.uri())).await;

    assert_eq!(report.stubs_found, 2);
    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.get("Title"), Some("Tablet A"));
    assert_eq!(record.get("Battery"), Some("10 h"));
    assert_eq!(record.get("Product URL"), Some(format!("{}/p/a", server.uri()).as_str()));
    assert_eq!(record.len(), 4);
    assert_eq!(report.skipped, vec!["Tablet B".to_string()]);

    let logs = logs.contents();
    assert!(logs.contains("WARN"));
    assert!(logs.contains("Skipping Tablet B as no details were extracted."));
    assert!(!logs.contains("Skipping Tablet A"));
    Ok(())
}

#[tokio::test]
async fn test_categories_are_crawled_in_selector_order() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        nav_html(&[("Phones", "/c/phones"), ("Missing", "/c/missing")]),
    )
    .await;
    mount_page(&server, "/c/phones", listing_html(&[("Phone A", "/p/a")], None)).await;
    mount_status(&server, "/c/missing", 404).await;
    mount_page(&server, "/p/a", detail_html(&[("Brand", "Acme")])).await;

    let crawler = Crawler::new(
        fetcher(),
        descriptor(),
        CrawlOptions {
            max_pages: 20,
            max_concurrent_details: 2,
        },
    );
    let results = crawler.crawl_categories(&format!("{}/", server.uri())).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Phones");
    assert_eq!(results[0].records.len(), 1);
    assert_eq!(results[1].name, "Missing");
    assert!(results[1].records.is_empty());
    Ok(())
}
