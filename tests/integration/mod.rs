// Shared fixtures for the crawler integration tests
// Pages are served by a wiremock server so the real HTTP fetcher is exercised.

pub mod pipeline_tests;

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use catalog_crawler::{
    AppConfig, HttpFetcher, PageDescriptor,
    config::{CrawlMode, CrawlerConfig, LoggingConfig, OutputConfig, OutputFormat, SelectorConfig},
};
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn selector_config() -> SelectorConfig {
    SelectorConfig {
        category_container: Some("ul.nav li.category".to_string()),
        category_name: "span".to_string(),
        category_link: "a".to_string(),
        product_container: "div.thumbnail".to_string(),
        product_title: "a.title".to_string(),
        product_image: "img.img-responsive".to_string(),
        product_link: None,
        next_page: "ul.pagination a[rel=next]".to_string(),
        detail_table: "table.table.table-bordered".to_string(),
        link_attribute: "href".to_string(),
        image_attribute: "src".to_string(),
    }
}

pub fn descriptor() -> PageDescriptor {
    PageDescriptor::from_config(&selector_config()).expect("test selectors compile")
}

pub fn test_config(base_url: &str, output: &Path, mode: CrawlMode, format: OutputFormat) -> AppConfig {
    AppConfig {
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            mode,
            max_concurrent_details: 4,
            max_pages: 20,
            request_timeout: 5,
            user_agent: Some("CatalogCrawler-Test/1.0".to_string()),
        },
        selectors: selector_config(),
        output: OutputConfig {
            path: output.to_path_buf(),
            format,
        },
        logging: LoggingConfig::default(),
    }
}

pub fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&test_config(
        "http://localhost",
        Path::new("unused.csv"),
        CrawlMode::Single,
        OutputFormat::Csv,
    )
    .crawler)
    .expect("client builds")
}

/// Listing page with one thumbnail per `(title, href)` and an optional next link.
pub fn listing_html(products: &[(&str, &str)], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><div class=\"row\">");
    for (title, href) in products {
        html.push_str(&format!(
            r#"<div class="col"><div class="thumbnail">
                <img class="img-responsive" src="/images{href}.jpg">
                <div class="caption"><h4><a class="title" href="{href}">{title}</a></h4></div>
            </div></div>"#
        ));
    }
    html.push_str("</div><ul class=\"pagination\">");
    if let Some(next) = next {
        html.push_str(&format!(r#"<li><a rel="next" href="{next}">&raquo;</a></li>"#));
    }
    html.push_str("</ul></body></html>");
    html
}

pub fn detail_html(rows: &[(&str, &str)]) -> String {
    let mut html = String::from(
        r#"<html><body><table class="table table-bordered mt-3"><tr><th colspan="2">Specifications</th></tr>"#,
    );
    for (key, value) in rows {
        html.push_str(&format!("<tr><td>{key}</td><td>{value}</td></tr>"));
    }
    html.push_str("</table></body></html>");
    html
}

pub fn nav_html(categories: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><ul class=\"nav\">");
    for (name, href) in categories {
        html.push_str(&format!(
            r#"<li class="category"><a href="{href}"><span>{name}</span></a></li>"#
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

pub async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_slow_page(server: &MockServer, page: &str, body: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, page: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + use<> {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
