//! Tests for argument parsing and the runner

use super::*;
use crate::sources::{reddit, unsplash, wallhaven};
use crate::types::MediaType;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_parse_wallhaven_defaults() {
    let cli = Cli::try_parse_from(["xanax", "wallhaven"]).unwrap();

    assert_eq!(cli.max_retries, 0);
    assert_eq!(cli.timeout, 30);
    assert!(cli.limit.is_none());
    assert!(cli.download.is_none());

    let Commands::Wallhaven {
        query,
        sorting,
        order,
        purity,
        categories,
        page,
        ..
    } = cli.command
    else {
        panic!("expected wallhaven command");
    };
    assert!(query.is_none());
    assert_eq!(sorting, wallhaven::Sort::DateAdded);
    assert_eq!(order, wallhaven::Order::Desc);
    assert_eq!(purity, vec![wallhaven::Purity::Sfw]);
    assert!(categories.is_empty());
    assert_eq!(page, 1);
}

#[test]
fn test_parse_wallhaven_lists() {
    let cli = Cli::try_parse_from([
        "xanax",
        "wallhaven",
        "mountains",
        "--purity",
        "sfw,sketchy",
        "--categories",
        "general,people",
        "--sorting",
        "toplist",
        "--top-range",
        "1M",
        "--resolution",
        "1920x1080",
        "--resolution",
        "2560x1440",
        "--colors",
        "0066cc",
        "-n",
        "5",
    ])
    .unwrap();

    assert_eq!(cli.limit, Some(5));
    let Commands::Wallhaven {
        query,
        purity,
        categories,
        sorting,
        top_range,
        resolution,
        colors,
        ..
    } = cli.command
    else {
        panic!("expected wallhaven command");
    };
    assert_eq!(query.as_deref(), Some("mountains"));
    assert_eq!(purity, vec![wallhaven::Purity::Sfw, wallhaven::Purity::Sketchy]);
    assert_eq!(
        categories,
        vec![wallhaven::Category::General, wallhaven::Category::People]
    );
    assert_eq!(sorting, wallhaven::Sort::Toplist);
    assert_eq!(top_range, Some(wallhaven::TopRange::OneMonth));
    assert_eq!(resolution, vec!["1920x1080", "2560x1440"]);
    assert_eq!(colors, vec![wallhaven::Color::Blue]);
}

#[test]
fn test_parse_unsplash() {
    let cli = Cli::try_parse_from([
        "xanax",
        "unsplash",
        "forest",
        "--orientation",
        "portrait",
        "--color",
        "black_and_white",
        "--safe",
    ])
    .unwrap();

    let Commands::Unsplash {
        query,
        per_page,
        order_by,
        orientation,
        color,
        safe,
        ..
    } = cli.command
    else {
        panic!("expected unsplash command");
    };
    assert_eq!(query, "forest");
    assert_eq!(per_page, unsplash::DEFAULT_PER_PAGE);
    assert_eq!(order_by, unsplash::OrderBy::Relevant);
    assert_eq!(orientation, Some(unsplash::Orientation::Portrait));
    assert_eq!(color, Some(unsplash::Color::BlackAndWhite));
    assert!(safe);
}

#[test]
fn test_parse_reddit() {
    let cli = Cli::try_parse_from([
        "xanax",
        "--max-retries",
        "3",
        "reddit",
        "EarthPorn+wallpapers",
        "--sort",
        "top",
        "--time",
        "week",
        "--media-type",
        "video",
        "--nsfw",
    ])
    .unwrap();

    assert_eq!(cli.max_retries, 3);
    let Commands::Reddit {
        subreddit,
        sort,
        time,
        page_size,
        media_type,
        nsfw,
        ..
    } = cli.command
    else {
        panic!("expected reddit command");
    };
    assert_eq!(subreddit, "EarthPorn+wallpapers");
    assert_eq!(sort, reddit::Sort::Top);
    assert_eq!(time, reddit::TimeFilter::Week);
    assert_eq!(page_size, reddit::DEFAULT_LIMIT);
    assert_eq!(media_type, MediaType::Video);
    assert!(nsfw);
}

#[test]
fn test_parse_rejects_unknown_values() {
    assert!(Cli::try_parse_from(["xanax", "wallhaven", "--purity", "spicy"]).is_err());
    assert!(Cli::try_parse_from(["xanax", "reddit", "pics", "--sort", "best"]).is_err());
    assert!(Cli::try_parse_from(["xanax", "unsplash"]).is_err());
}

fn wallpaper(id: &str, base: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://wallhaven.cc/w/{id}"),
        "short_url": format!("http://whvn.cc/{id}"),
        "views": 1,
        "favorites": 0,
        "source": "",
        "purity": "sfw",
        "category": "general",
        "dimension_x": 1920,
        "dimension_y": 1080,
        "resolution": "1920x1080",
        "ratio": "1.78",
        "file_size": 4,
        "file_type": "image/png",
        "created_at": "2024-01-01 00:00:00",
        "colors": [],
        "path": format!("{base}/full/ab/wallhaven-{id}.png"),
        "thumbs": {
            "large": "https://th.wallhaven.cc/lg/ab.jpg",
            "original": "https://th.wallhaven.cc/orig/ab.jpg",
            "small": "https://th.wallhaven.cc/small/ab.jpg"
        }
    })
}

fn listing(ids: &[&str], current: u32, base: &str) -> Value {
    json!({
        "data": ids.iter().map(|id| wallpaper(id, base)).collect::<Vec<_>>(),
        "meta": {
            "current_page": current,
            "last_page": 3,
            "per_page": 2,
            "total": 6,
            "query": null,
            "seed": null
        }
    })
}

#[tokio::test]
async fn test_runner_prints_and_downloads_up_to_limit() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["c", "d"], 2, &base)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], 1, &base)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/full/ab/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG".to_vec()))
        .expect(3)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");
    let cli = Cli::try_parse_from([
        "xanax",
        "--base-url",
        base.as_str(),
        "-n",
        "3",
        "-d",
        target.to_str().unwrap(),
        "wallhaven",
        "cats",
    ])
    .unwrap();

    let mut out = Vec::new();
    let count = Runner::new(cli).run_to(&mut out).await.unwrap();
    assert_eq!(count, 3);

    let ids: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).unwrap();
            value["id"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    for id in ["a", "b", "c"] {
        let saved = std::fs::read(target.join(format!("wallhaven-{id}.png"))).unwrap();
        assert_eq!(saved, b"\x89PNG");
    }
    assert!(!target.join("wallhaven-d.png").exists());
}

#[tokio::test]
async fn test_runner_surfaces_validation_errors() {
    let cli = Cli::try_parse_from([
        "xanax",
        "--base-url",
        "http://127.0.0.1:9",
        "wallhaven",
        "--api-key",
        "key",
        "--seed",
        "abc",
    ])
    .unwrap();

    let mut out = Vec::new();
    let err = Runner::new(cli).run_to(&mut out).await.unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    assert!(out.is_empty());
}
