use std::time::Duration;

use menuscrape_core::csv::read_records;
use menuscrape_core::{CsvFileSink, JsonFileSink, MenuRecord, MenuScraper, Price, ScrapeError, Stage};
use menuscrape_fetch::{CachingFetcher, FetchConfig, FetchError, HttpFetcher, RetryingFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDER_PAGE: &str = include_str!("fixtures/order_menu.html");
const LEGACY_PAGE: &str = include_str!("fixtures/legacy_menu.html");
const SCHEMA_ORG_PAGE: &str = include_str!("fixtures/schema_org_menu.html");
const NO_PAYLOAD_PAGE: &str = include_str!("fixtures/no_payload.html");

const PAGE_PATH: &str = "/bangalore/restaurant/order";

fn http() -> HttpFetcher {
    HttpFetcher::new(&FetchConfig {
        timeout: 5,
        ..FetchConfig::default()
    })
    .unwrap()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes(), "text/html; charset=utf-8")
}

async fn serve(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(html(body))
        .mount(&server)
        .await;
    server
}

fn page_url(server: &MockServer) -> String {
    format!("{}{PAGE_PATH}", server.uri())
}

fn names(records: &[MenuRecord]) -> Vec<&str> {
    records.iter().map(|r| r.item_name.as_str()).collect()
}

#[tokio::test]
async fn single_category_items_have_empty_sub_category() {
    let server = serve(ORDER_PAGE).await;
    let out = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();

    assert_eq!(out.restaurant, "Truffles");
    assert_eq!(out.convention, "preloaded_state");
    assert_eq!(out.schema, "zomato_order_menu");
    assert_eq!(
        names(&out.records),
        ["All American Cheese Burger", "Crispy Veg Burger", "Egg Burger"]
    );
    for r in &out.records {
        assert_eq!(r.restaurant, "Truffles");
        assert_eq!(r.category, "Burgers");
        assert_eq!(r.sub_category, "");
    }
    assert_eq!(out.records[0].desc, "Grilled patty with cheddar");
    assert_eq!(out.records[2].price, Price::Amount(1099.into()));
}

#[tokio::test]
async fn currency_symbol_is_stripped_from_price() {
    let server = serve(ORDER_PAGE).await;
    let out = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();

    let burger = &out.records[0];
    assert_eq!(burger.price, Price::Amount(199.into()));
    let json = serde_json::to_value(burger).unwrap();
    assert_eq!(json["price"], 199);
}

#[tokio::test]
async fn missing_dietary_field_is_empty_list() {
    let server = serve(ORDER_PAGE).await;
    let out = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();

    let veg = &out.records[1];
    assert_eq!(veg.item_name, "Crispy Veg Burger");
    assert!(veg.dietary_slugs.is_empty());
    let json = serde_json::to_value(veg).unwrap();
    assert_eq!(json["dietary_slugs"], serde_json::json!([]));
}

#[tokio::test]
async fn sub_categories_are_attributed_per_item() {
    let server = serve(LEGACY_PAGE).await;
    let out = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();

    assert_eq!(out.restaurant, "Meghana Foods");
    assert_eq!(out.convention, "next_data");
    assert_eq!(out.schema, "zomato_legacy_menu");

    let lineage: Vec<(&str, &str, &str)> = out
        .records
        .iter()
        .map(|r| (r.category.as_str(), r.sub_category.as_str(), r.item_name.as_str()))
        .collect();
    assert_eq!(
        lineage,
        [
            ("Biryani", "Chicken", "Chicken Boneless Biryani"),
            ("Biryani", "Chicken", "Chicken Dum Biryani"),
            ("Starters", "Veg", "Paneer 65"),
            ("Starters", "Veg", "Gobi Manchurian"),
        ]
    );
    assert_eq!(out.records[1].price, Price::Amount(310.into()));
    assert_eq!(out.records[0].dietary_slugs, ["non-veg"]);
    assert_eq!(out.records[0].desc, "Mildly spiced");
    assert_eq!(out.records[3].dietary_slugs, ["veg", "spicy"]);
}

#[tokio::test]
async fn schema_org_sections_become_categories() {
    let server = serve(SCHEMA_ORG_PAGE).await;
    let out = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();

    assert_eq!(out.restaurant, "Third Wave Coffee");
    assert_eq!(out.convention, "ld_json");
    assert_eq!(out.schema, "schema_org_menu");
    assert_eq!(names(&out.records), ["Cappuccino", "Flat White", "Banana Bread"]);
    assert_eq!(out.excluded, 1);

    let cappuccino = &out.records[0];
    assert_eq!(cappuccino.category, "Coffee");
    assert_eq!(cappuccino.sub_category, "Hot");
    assert_eq!(cappuccino.price, Price::Amount(210.into()));
    assert_eq!(cappuccino.dietary_slugs, ["veg"]);

    let bread = &out.records[2];
    assert_eq!(bread.category, "Bakes");
    assert_eq!(bread.sub_category, "");
    assert_eq!(bread.desc, "Walnut loaf");
}

#[tokio::test]
async fn http_404_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Fetching);
    match err {
        ScrapeError::Transport(e) => assert_eq!(e.status(), Some(404)),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn page_without_payload_is_not_found() {
    let server = serve(NO_PAYLOAD_PAGE).await;
    let err = MenuScraper::new(http())
        .get_menu(&page_url(&server), false)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Locating);
    match err {
        ScrapeError::NotFound(e) => {
            assert_eq!(e.conventions_tried, ["preloaded_state", "next_data", "ld_json"]);
        }
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_recovers_from_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(html(ORDER_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(http(), 2, Duration::from_millis(1));
    let out = MenuScraper::new(fetcher)
        .get_menu(&page_url(&server), false)
        .await
        .unwrap();
    assert_eq!(out.records.len(), 3);
}

#[tokio::test]
async fn retries_give_up_with_last_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(http(), 2, Duration::from_millis(1));
    let err = MenuScraper::new(fetcher)
        .get_menu(&page_url(&server), false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::Transport(FetchError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn cache_hit_skips_second_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAGE_PATH))
        .respond_with(html(ORDER_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = MenuScraper::new(CachingFetcher::new(http(), None));
    let url = page_url(&server);
    let first = scraper.get_menu(&url, false).await.unwrap();
    let second = scraper.get_menu(&url, false).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(scraper.fetcher().len(), 1);
}

#[tokio::test]
async fn repeated_scrapes_are_identical() {
    let server = serve(LEGACY_PAGE).await;
    let scraper = MenuScraper::new(http());
    let url = page_url(&server);
    let first = scraper.get_menu(&url, false).await.unwrap();
    let second = scraper.get_menu(&url, false).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn save_writes_csv_named_after_restaurant() {
    let server = serve(ORDER_PAGE).await;
    let dir = tempfile::tempdir().unwrap();
    let scraper = MenuScraper::new(http()).with_sink(CsvFileSink::new(dir.path()));

    let out = scraper.get_menu(&page_url(&server), true).await.unwrap();
    let saved = out.saved_to.clone().unwrap();
    assert_eq!(saved, dir.path().join("truffles.csv"));

    let text = std::fs::read_to_string(&saved).unwrap();
    assert!(text.starts_with("restaurant,category,sub_category,item_name,price,desc,dietary_slugs\n"));
    assert_eq!(read_records(&text).unwrap(), out.records);

    let again = scraper.get_menu(&page_url(&server), true).await.unwrap();
    assert_eq!(again.saved_to, Some(saved.clone()));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), text);
}

#[tokio::test]
async fn save_writes_json_array() {
    let server = serve(LEGACY_PAGE).await;
    let dir = tempfile::tempdir().unwrap();
    let scraper = MenuScraper::new(http()).with_sink(JsonFileSink::new(dir.path()));

    let out = scraper.get_menu(&page_url(&server), true).await.unwrap();
    let saved = out.saved_to.clone().unwrap();
    assert_eq!(saved, dir.path().join("meghana-foods.json"));
    let parsed: Vec<MenuRecord> = serde_json::from_slice(&std::fs::read(&saved).unwrap()).unwrap();
    assert_eq!(parsed, out.records);
}

#[tokio::test]
async fn empty_menu_is_success_without_artifact() {
    let page = r#"<script>window.__PRELOADED_STATE__ = {"pages":{"restaurant":{"7":{"sections":{"SECTION_BASIC_INFO":{"name":"Closed Kitchen"}},"order":{"menuList":{"menus":[]}}}}}};</script>"#;
    let server = serve(page).await;
    let dir = tempfile::tempdir().unwrap();
    let scraper = MenuScraper::new(http()).with_sink(CsvFileSink::new(dir.path()));

    let out = scraper.get_menu(&page_url(&server), true).await.unwrap();
    assert!(out.is_empty());
    assert_eq!(out.restaurant, "Closed Kitchen");
    assert_eq!(out.saved_to, None);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
