//! API integration tests against a running server with a migrated database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn admin_token() -> String {
    std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "change-this-token-in-production".to_string())
}

/// A 13 character ISBN that is unique per call
fn unique_isbn() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..13].to_string()
}

async fn admin_post(client: &Client, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/admin/{}", BASE_URL, path))
        .bearer_auth(admin_token())
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201, "POST {} failed", path);
    response.json().await.expect("Failed to parse response")
}

async fn admin_delete(client: &Client, path: &str) {
    let _ = client
        .delete(format!("{}/admin/{}", BASE_URL, path))
        .bearer_auth(admin_token())
        .send()
        .await;
}

async fn create_author(client: &Client, first: &str, last: &str) -> i64 {
    let author = admin_post(
        client,
        "authors",
        json!({ "first_name": first, "last_name": last }),
    )
    .await;
    author["id"].as_i64().expect("No author ID")
}

async fn create_book(client: &Client, title: &str, author_id: i64, extra: Value) -> i64 {
    let mut body = json!({
        "title": title,
        "author_ids": [author_id],
        "summary": format!("Summary of {}", title),
        "isbn": unique_isbn(),
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            body.insert(k.clone(), v.clone());
        }
    }
    let book = admin_post(client, "books", body).await;
    book["id"].as_i64().expect("No book ID")
}

async fn get_json(client: &Client, url: &str) -> Value {
    let response = client.get(url).send().await.expect("Failed to send request");
    assert!(response.status().is_success(), "GET {} failed", url);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_readiness() {
    let client = Client::new();
    let body = get_json(&client, &format!("{}/ready", BASE_URL)).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_pagination_nineteen_books() {
    let client = Client::new();
    let author = create_author(&client, "Page", "Counter").await;
    let tag = admin_post(&client, "tags", json!({ "name": "paging" })).await;
    let tag_id = tag["id"].as_i64().unwrap();

    let mut books = Vec::new();
    for i in 0..19 {
        books.push(create_book(&client, &format!("Volume {}", i), author, json!({ "tag_ids": [tag_id] })).await);
    }

    let page1 = get_json(&client, &format!("{}/books?tag={}", BASE_URL, tag_id)).await;
    assert_eq!(page1["books"].as_array().unwrap().len(), 18);
    assert_eq!(page1["page"]["num_pages"], 2);

    let page2 = get_json(&client, &format!("{}/books?tag={}&page=2", BASE_URL, tag_id)).await;
    assert_eq!(page2["books"].as_array().unwrap().len(), 1);

    // Out of range falls back to the last page
    let page99 = get_json(&client, &format!("{}/books?tag={}&page=99", BASE_URL, tag_id)).await;
    assert_eq!(page99["page"]["number"], 2);

    for id in books {
        admin_delete(&client, &format!("books/{}", id)).await;
    }
    admin_delete(&client, &format!("tags/{}", tag_id)).await;
    admin_delete(&client, &format!("authors/{}", author)).await;
}

#[tokio::test]
#[ignore]
async fn test_year_filter_and_year_list() {
    let client = Client::new();
    let author = create_author(&client, "Year", "Keeper").await;
    let book_1869 = create_book(&client, "Dated", author, json!({ "year": 1869 })).await;
    let book_1870 = create_book(&client, "Later", author, json!({ "year": 1870 })).await;
    let undated = create_book(&client, "Undated", author, json!({})).await;

    let body = get_json(&client, &format!("{}/books?year=1869", BASE_URL)).await;
    let books = body["books"].as_array().unwrap();
    assert!(books.iter().all(|b| b["year"] == 1869));
    assert!(books.iter().any(|b| b["id"] == book_1869));
    assert!(!books.iter().any(|b| b["id"] == book_1870));

    let years: Vec<i64> = body["year_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|y| y.as_i64().expect("year_list contains null"))
        .collect();
    let mut expected = years.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(years, expected);
    assert!(years.contains(&1869) && years.contains(&1870));

    for id in [book_1869, book_1870, undated] {
        admin_delete(&client, &format!("books/{}", id)).await;
    }
    admin_delete(&client, &format!("authors/{}", author)).await;
}

#[tokio::test]
#[ignore]
async fn test_search_is_case_insensitive() {
    let client = Client::new();
    let author = create_author(&client, "Sear", "Cher").await;
    let book = create_book(&client, "The Zanzibar Quartet", author, json!({})).await;

    let body = get_json(&client, &format!("{}/search?q=zANZIbar", BASE_URL)).await;
    assert!(body["book_list"].as_array().unwrap().iter().any(|b| b["id"] == book));

    let body = get_json(&client, &format!("{}/search?q=qqxxzz-nowhere", BASE_URL)).await;
    assert!(body["book_list"].as_array().unwrap().is_empty());

    let body = get_json(&client, &format!("{}/search?q=cher", BASE_URL)).await;
    assert!(body["author_list"].as_array().unwrap().iter().any(|a| a["id"] == author));

    admin_delete(&client, &format!("books/{}", book)).await;
    admin_delete(&client, &format!("authors/{}", author)).await;
}

#[tokio::test]
#[ignore]
async fn test_deleting_publisher_keeps_book() {
    let client = Client::new();
    let author = create_author(&client, "Pub", "Lisher").await;
    let publisher = admin_post(&client, "publishers", json!({ "name": "Vanishing Press" })).await;
    let publisher_id = publisher["id"].as_i64().unwrap();
    let book = create_book(&client, "Survivor", author, json!({ "publisher_id": publisher_id })).await;

    let detail = get_json(&client, &format!("{}/books/{}", BASE_URL, book)).await;
    assert_eq!(detail["publisher"]["name"], "Vanishing Press");

    let response = client
        .delete(format!("{}/admin/publishers/{}", BASE_URL, publisher_id))
        .bearer_auth(admin_token())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let detail = get_json(&client, &format!("{}/books/{}", BASE_URL, book)).await;
    assert!(detail["publisher"].is_null());

    admin_delete(&client, &format!("books/{}", book)).await;
    admin_delete(&client, &format!("authors/{}", author)).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflicts() {
    let client = Client::new();
    let author = create_author(&client, "Dup", "Licate").await;
    let isbn = unique_isbn();

    let first = admin_post(
        &client,
        "books",
        json!({ "title": "Original", "author_ids": [author], "summary": "A short summary", "isbn": isbn }),
    )
    .await;

    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(admin_token())
        .json(&json!({ "title": "Copy", "author_ids": [author], "summary": "A short summary", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    admin_delete(&client, &format!("books/{}", first["id"])).await;
    admin_delete(&client, &format!("authors/{}", author)).await;
}

#[tokio::test]
#[ignore]
async fn test_admin_book_list_display_author() {
    let client = Client::new();
    let first = create_author(&client, "Ilya", "Ilf").await;
    let second = create_author(&client, "Yevgeny", "Petrov").await;
    let book = admin_post(
        &client,
        "books",
        json!({
            "title": "The Twelve Chairs",
            "author_ids": [first, second],
            "summary": "A short summary",
            "isbn": unique_isbn(),
            "year": 1928
        }),
    )
    .await;

    let response = client
        .get(format!("{}/admin/books?year=1928", BASE_URL))
        .bearer_auth(admin_token())
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let row = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == book["id"])
        .expect("Book missing from admin list")
        .clone();
    assert_eq!(row["display_author"], "Ilya Ilf, Yevgeny Petrov");

    admin_delete(&client, &format!("books/{}", book["id"])).await;
    admin_delete(&client, &format!("authors/{}", first)).await;
    admin_delete(&client, &format!("authors/{}", second)).await;
}

#[tokio::test]
#[ignore]
async fn test_upload_cover() {
    let client = Client::new();
    let author = create_author(&client, "Cover", "Artist").await;
    let book = create_book(&client, "Illustrated", author, json!({})).await;

    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(4, 4)
        .write_to(&mut png, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    let part = reqwest::multipart::Part::bytes(png.into_inner()).file_name("front.png");
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/admin/books/{}/cover", BASE_URL, book))
        .bearer_auth(admin_token())
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let cover = body["cover"].as_str().expect("No cover path");
    assert!(cover.starts_with("images/"));
    assert!(cover.ends_with(".png"));

    admin_delete(&client, &format!("books/{}", book)).await;
    admin_delete(&client, &format!("authors/{}", author)).await;
}
