//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small storefront with the same page
//! layout as books.toscrape.com and run full harvests into a temp directory.

use shelf_harvest::config::Config;
use shelf_harvest::crawler::{list_categories, run_harvest, PageFetcher, Paginator};
use shelf_harvest::{FetchError, HarvestError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT_PAGE: &str = r#"<html><body>
<div class="side_categories">
  <ul class="nav nav-list">
    <li>
      <a href="catalogue/category/books_1/index.html">Books</a>
      <ul>
        <li><a href="catalogue/category/books/mystery_3/index.html">Mystery</a></li>
        <li><a href="catalogue/category/books/poetry_23/index.html">Poetry</a></li>
      </ul>
    </li>
  </ul>
</div>
</body></html>"#;

struct Book {
    slug: &'static str,
    title: &'static str,
    stock: u32,
    rating: &'static str,
}

const MYSTERY_PAGE_1: [Book; 2] = [
    Book {
        slug: "sharp-objects_997",
        title: "Sharp Objects",
        stock: 20,
        rating: "Four",
    },
    Book {
        slug: "in-a-dark-dark-wood_963",
        title: "In a Dark, Dark Wood",
        stock: 19,
        rating: "One",
    },
];

const MYSTERY_PAGE_2: [Book; 2] = [
    Book {
        slug: "the-past-never-ends_942",
        title: "The Past Never Ends",
        stock: 16,
        rating: "Four",
    },
    Book {
        slug: "a-murder-in-time_877",
        title: "A Murder in Time",
        stock: 16,
        rating: "One",
    },
];

const POETRY_PAGE_1: [Book; 1] = [Book {
    slug: "a-light-in-the-attic_1000",
    title: "A Light in the Attic",
    stock: 22,
    rating: "Three",
}];

fn category_page(name: &str, books: &[Book], next: Option<&str>) -> String {
    let pods: String = books
        .iter()
        .map(|book| {
            format!(
                r#"<li><article class="product_pod">
<div class="image_container"><a href="../../../{slug}/index.html"><img src="../../../../media/cache/{slug}.jpg" alt="{title}"></a></div>
<h3><a href="../../../{slug}/index.html" title="{title}">{title}</a></h3>
</article></li>"#,
                slug = book.slug,
                title = book.title
            )
        })
        .collect();
    let pager = match next {
        Some(href) => format!(
            r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#,
            href
        ),
        None => String::new(),
    };
    format!(
        r#"<html><body>
<ul class="breadcrumb">
  <li><a href="../../../../index.html">Home</a></li>
  <li><a href="../../books_1/index.html">Books</a></li>
  <li class="active">{name}</li>
</ul>
<ol class="row">{pods}</ol>
{pager}
</body></html>"#
    )
}

fn product_page(category: &str, book: &Book) -> String {
    format!(
        r#"<html><body>
<ul class="breadcrumb">
  <li><a href="../../index.html">Home</a></li>
  <li><a href="../category/books_1/index.html">Books</a></li>
  <li>
<a href="../category/books/{cat_slug}/index.html">{category}</a>
</li>
  <li class="active">{title}</li>
</ul>
<div class="item active"><img src="../../media/cache/{slug}.jpg" alt="{title}" /></div>
<div class="product_main">
  <h1>{title}</h1>
  <p class="price_color">£47.82</p>
  <p class="instock availability">In stock ({stock} available)</p>
  <p class="star-rating {rating}"></p>
</div>
<p>Description of {title}.</p>
<table class="table table-striped">
  <tr><th>UPC</th><td>upc-{slug}</td></tr>
  <tr><th>Product Type</th><td>Books</td></tr>
  <tr><th>Price (excl. tax)</th><td>£47.82</td></tr>
  <tr><th>Price (incl. tax)</th><td>£50.00</td></tr>
  <tr><th>Tax</th><td>£2.18</td></tr>
  <tr><th>Availability</th><td>In stock ({stock} available)</td></tr>
  <tr><th>Number of reviews</th><td>0</td></tr>
</table>
</body></html>"#,
        cat_slug = category.to_lowercase(),
        category = category,
        title = book.title,
        slug = book.slug,
        stock = book.stock,
        rating = book.rating,
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_books(server: &MockServer, category: &str, books: &[Book]) {
    for book in books {
        mount_html(
            server,
            &format!("/catalogue/{}/index.html", book.slug),
            product_page(category, book),
        )
        .await;
        Mock::given(method("GET"))
            .and(path(format!("/media/cache/{}.jpg", book.slug)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(book.slug.as_bytes().to_vec()))
            .mount(server)
            .await;
    }
}

/// Mystery spans two listing pages with four books; Poetry has a single page
async fn start_storefront() -> MockServer {
    let server = MockServer::start().await;

    mount_html(&server, "/", ROOT_PAGE.to_string()).await;

    mount_html(
        &server,
        "/catalogue/category/books/mystery_3/index.html",
        category_page("Mystery", &MYSTERY_PAGE_1, Some("page-2.html")),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/category/books/mystery_3/page-2.html",
        category_page("Mystery", &MYSTERY_PAGE_2, None),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/category/books/poetry_23/index.html",
        category_page("Poetry", &POETRY_PAGE_1, None),
    )
    .await;

    mount_books(&server, "Mystery", &MYSTERY_PAGE_1).await;
    mount_books(&server, "Mystery", &MYSTERY_PAGE_2).await;
    mount_books(&server, "Poetry", &POETRY_PAGE_1).await;

    server
}

fn test_config(server: &MockServer, data_root: &Path) -> Config {
    let mut config = Config::default();
    config.site.root_url = format!("{}/", server.uri());
    config.output.data_root = data_root.to_path_buf();
    config
}

fn sorted_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read image folder")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_list_categories_drops_all_products() {
    let server = start_storefront().await;
    let fetcher = PageFetcher::from_config(&Config::default()).unwrap();

    let categories = list_categories(&fetcher, &format!("{}/", server.uri()))
        .await
        .expect("Failed to list categories");

    assert_eq!(
        categories,
        vec![
            format!("{}/catalogue/category/books/mystery_3/index.html", server.uri()),
            format!("{}/catalogue/category/books/poetry_23/index.html", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_paginator_concatenates_pages_in_order() {
    let server = start_storefront().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = PageFetcher::from_config(&config).unwrap();
    let paginator = Paginator::from_config(&fetcher, &config);

    let urls = paginator
        .list_product_urls(&format!(
            "{}/catalogue/category/books/mystery_3/index.html",
            server.uri()
        ))
        .await
        .expect("Pagination failed");

    let expected: Vec<String> = MYSTERY_PAGE_1
        .iter()
        .chain(MYSTERY_PAGE_2.iter())
        .map(|book| format!("{}/catalogue/{}/index.html", server.uri(), book.slug))
        .collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_paginator_single_page() {
    let server = start_storefront().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = PageFetcher::from_config(&config).unwrap();
    let paginator = Paginator::from_config(&fetcher, &config);

    let urls = paginator
        .list_product_urls(&format!(
            "{}/catalogue/category/books/poetry_23/index.html",
            server.uri()
        ))
        .await
        .expect("Pagination failed");

    assert_eq!(
        urls,
        vec![format!(
            "{}/catalogue/a-light-in-the-attic_1000/index.html",
            server.uri()
        )]
    );
}

#[tokio::test]
async fn test_paginator_skips_repeated_links() {
    const REPEATS_PAGE_2: [Book; 2] = [
        Book {
            slug: "sharp-objects_997",
            title: "Sharp Objects",
            stock: 20,
            rating: "Four",
        },
        Book {
            slug: "the-past-never-ends_942",
            title: "The Past Never Ends",
            stock: 16,
            rating: "Four",
        },
    ];

    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/category/books/crime_51/index.html",
        category_page("Crime", &MYSTERY_PAGE_1, Some("page-2.html")),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/category/books/crime_51/page-2.html",
        category_page("Crime", &REPEATS_PAGE_2, None),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, dir.path());
    let fetcher = PageFetcher::from_config(&config).unwrap();
    let paginator = Paginator::from_config(&fetcher, &config);

    let urls = paginator
        .list_product_urls(&format!(
            "{}/catalogue/category/books/crime_51/index.html",
            server.uri()
        ))
        .await
        .expect("Pagination failed");

    let expected: Vec<String> = [
        "sharp-objects_997",
        "in-a-dark-dark-wood_963",
        "the-past-never-ends_942",
    ]
    .iter()
    .map(|slug| format!("{}/catalogue/{}/index.html", server.uri(), slug))
    .collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_paginator_respects_page_limit() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/category/books/loop_9/index.html",
        category_page("Loop", &POETRY_PAGE_1, Some("page-2.html")),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/category/books/loop_9/page-2.html",
        category_page("Loop", &POETRY_PAGE_1, Some("page-3.html")),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, dir.path());
    config.harvest.max_pages = 2;
    let fetcher = PageFetcher::from_config(&config).unwrap();
    let paginator = Paginator::from_config(&fetcher, &config);

    let result = paginator
        .list_product_urls(&format!(
            "{}/catalogue/category/books/loop_9/index.html",
            server.uri()
        ))
        .await;

    assert!(matches!(
        result,
        Err(HarvestError::Parse {
            field: "pagination",
            ..
        })
    ));
}

#[tokio::test]
async fn test_full_harvest_writes_csv_and_images() {
    let server = start_storefront().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, dir.path());

    let report = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.total_products(), 5);
    assert_eq!(report.total_images(), 5);
    assert!(report.finished_at.is_some());

    // Mystery: header plus four rows in discovery order
    let csv = fs::read_to_string(dir.path().join("mystery.csv")).expect("Missing mystery.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "product_page_url;universal_product_code (upc);title;price_including_tax;\
         price_excluding_tax;number_available;product_description;category;\
         review_rating;image_url"
    );

    let expected_titles = [
        "Sharp Objects",
        "In a Dark, Dark Wood",
        "The Past Never Ends",
        "A Murder in Time",
    ];
    let mystery_books = MYSTERY_PAGE_1.iter().chain(MYSTERY_PAGE_2.iter());
    for (line, book) in lines[1..].iter().zip(mystery_books) {
        let fields: Vec<&str> = line.split(';').collect();
        assert_eq!(
            fields[0],
            format!("{}/catalogue/{}/index.html", server.uri(), book.slug)
        );
        assert_eq!(fields[1], format!("upc-{}", book.slug));
        assert_eq!(fields[3], "50.00");
        assert_eq!(fields[4], "47.82");
        assert_eq!(fields[5], book.stock.to_string());
        assert_eq!(fields[7], "Mystery");
        assert_eq!(
            fields[9],
            format!("{}/media/cache/{}.jpg", server.uri(), book.slug)
        );
    }
    let titles: Vec<&str> = lines[1..]
        .iter()
        .map(|line| line.split(';').nth(2).unwrap())
        .collect();
    assert_eq!(titles, expected_titles);

    let ratings: Vec<&str> = lines[1..]
        .iter()
        .map(|line| line.split(';').nth(8).unwrap())
        .collect();
    assert_eq!(ratings, vec!["4", "1", "4", "1"]);

    // Mystery images: one per product, named by slugged title
    assert_eq!(
        sorted_file_names(&dir.path().join("mystery")),
        vec![
            "a-murder-in-time.jpg",
            "in-a-dark-dark-wood.jpg",
            "sharp-objects.jpg",
            "the-past-never-ends.jpg",
        ]
    );
    assert_eq!(
        fs::read(dir.path().join("mystery").join("sharp-objects.jpg")).unwrap(),
        b"sharp-objects_997".to_vec()
    );

    // Poetry: single page
    let poetry = fs::read_to_string(dir.path().join("poetry.csv")).expect("Missing poetry.csv");
    assert_eq!(poetry.lines().count(), 2);
    assert!(poetry.contains(";A Light in the Attic;"));
    assert_eq!(
        sorted_file_names(&dir.path().join("poetry")),
        vec!["a-light-in-the-attic.jpg"]
    );
}

#[tokio::test]
async fn test_harvest_is_idempotent() {
    let server = start_storefront().await;
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    run_harvest(test_config(&server, first.path()))
        .await
        .expect("First harvest failed");
    run_harvest(test_config(&server, second.path()))
        .await
        .expect("Second harvest failed");

    for name in ["mystery.csv", "poetry.csv"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{} differs between runs",
            name
        );
    }
}

#[tokio::test]
async fn test_category_filter_limits_output() {
    let server = start_storefront().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, dir.path());
    config.harvest.categories = vec!["poetry".to_string()];
    config.harvest.skip_images = true;

    let report = run_harvest(config).await.expect("Harvest failed");

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].name, "Poetry");
    assert_eq!(report.skipped_categories, vec!["Mystery".to_string()]);
    assert!(dir.path().join("poetry.csv").exists());
    assert!(!dir.path().join("mystery.csv").exists());
    assert!(!dir.path().join("poetry").exists());
}

#[tokio::test]
async fn test_missing_image_aborts_after_csv() {
    let server = MockServer::start().await;
    mount_html(&server, "/", ROOT_PAGE.to_string()).await;
    mount_html(
        &server,
        "/catalogue/category/books/mystery_3/index.html",
        category_page("Mystery", &MYSTERY_PAGE_1, None),
    )
    .await;
    for book in &MYSTERY_PAGE_1 {
        mount_html(
            &server,
            &format!("/catalogue/{}/index.html", book.slug),
            product_page("Mystery", book),
        )
        .await;
    }
    // No image routes: wiremock answers 404

    let dir = TempDir::new().unwrap();
    let result = run_harvest(test_config(&server, dir.path())).await;

    match result {
        Err(HarvestError::Fetch(FetchError::Status { status, url })) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/media/cache/sharp-objects_997.jpg"));
        }
        other => panic!("expected image fetch failure, got {:?}", other.map(|_| ())),
    }

    // The CSV was complete before image downloads started and stays on disk
    let csv = fs::read_to_string(dir.path().join("mystery.csv")).expect("Missing mystery.csv");
    assert_eq!(csv.lines().count(), 3);
    assert!(!dir.path().join("poetry.csv").exists());
}
