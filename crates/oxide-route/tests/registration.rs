//! Tests for route registration, matching and reverse lookup.

mod common;
use common::*;

use std::collections::HashMap;

use oxide_route::{GroupSettings, Handler, MatchStrategy, Method, Router, RouterSettings};

fn subs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn literal_route_matches_exactly() {
    let mut router = Router::new();
    router.get("/about", text("about"));

    let found = router.find(Method::Get, "/about").expect("route");
    assert_eq!(found.route.handler.to_string(), "<closure>");
    assert!(router.find(Method::Get, "/aboutx").is_none());
    assert!(router.find(Method::Post, "/about").is_none());
}

#[test]
fn placeholder_binds_positionally() {
    let mut router = Router::new();
    router.get("/user/{id}/edit", echo_params());

    let found = router.find(Method::Get, "/user/1/edit").expect("route");
    assert_eq!(found.params.values(), vec!["1"]);
    assert_eq!(found.params.get("id"), Some("1"));
    assert!(router.find(Method::Get, "/user/1/notedit").is_none());
}

#[test]
fn literal_segment_never_binds() {
    let mut router = Router::new();
    router.get("/user/{id}/edit", echo_params());
    assert!(router.find(Method::Get, "/member/1/edit").is_none());
}

#[test]
fn optional_segment_creates_two_routes() {
    let mut router = Router::new();
    router.get("name/{name?}", echo_params()).name("name");

    let routes = router.route_list();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].path, "/name");
    assert_eq!(routes[1].path, "/name/{name}");
    assert!(routes.iter().all(|r| r.name == "name"));
}

#[test]
fn crud_generates_resource_routes() {
    let mut router = Router::new();
    router.crud("/posts", "PostController");

    let expected = [
        (Method::Get, "/posts", "posts.index", "PostController@index"),
        (Method::Get, "/posts/create", "posts.create", "PostController@create"),
        (Method::Get, "/posts/{param}", "posts.show", "PostController@show"),
        (Method::Get, "/posts/{param}/edit", "posts.edit", "PostController@edit"),
        (Method::Post, "/posts", "posts.store", "PostController@store"),
        (Method::Put, "/posts/{param}", "posts.update", "PostController@update"),
        (Method::Patch, "/posts/{param}", "posts.update", "PostController@update"),
        (Method::Delete, "/posts/{param}", "posts.destroy", "PostController@destroy"),
    ];

    let routes = router.route_list();
    assert_eq!(routes.len(), expected.len());
    for (route, (method, path, name, handler)) in routes.iter().zip(expected) {
        assert_eq!(route.method, method);
        assert_eq!(route.path, path);
        assert_eq!(route.name, name);
        assert_eq!(route.handler, handler);
    }
}

#[test]
fn crud_on_root_keeps_index_and_store() {
    let mut router = Router::new();
    router.crud("/", "PostController");

    let routes = router.route_list();
    assert_eq!(routes.len(), 8);
    assert_eq!((routes[0].path.as_str(), routes[0].name.as_str()), ("/", "index"));
    assert_eq!((routes[4].path.as_str(), routes[4].name.as_str()), ("/", "store"));
    assert_eq!(routes[2].path, "/{param}");
    assert_eq!(router.find(Method::Post, "/").expect("route").route.name, "store");
}

#[test]
fn crud_resolves_create_before_show() {
    let mut router = Router::new();
    router.crud("/posts", "PostController");
    let found = router.find(Method::Get, "/posts/create").expect("route");
    assert_eq!(found.route.name, "posts.create");
}

#[test]
fn group_applies_prefixes_and_resets() {
    let mut router = Router::new();
    router.group(
        GroupSettings::new()
            .url_prefix("user/{userId}")
            .name_prefix("user."),
        |r| {
            r.get("profile", echo_params()).name("profile");
            r.get("action/{actionId}", echo_params()).name("action");
        },
    );

    let routes = router.route_list();
    assert_eq!(routes[0].path, "/user/{userId}/profile");
    assert_eq!(routes[0].name, "user.profile");
    assert_eq!(routes[1].path, "/user/{userId}/action/{actionId}");
    assert_eq!(routes[1].name, "user.action");
    assert!(router.group_settings().is_none());

    router.get("after", text("after")).name("after");
    assert_eq!(router.routes()[2].path(), "/after");
    assert_eq!(router.routes()[2].name, "after");
}

#[test]
fn group_middleware_applies_to_every_route() {
    let mut router = Router::new();
    router.group(GroupSettings::new().middleware("auth"), |r| {
        r.any("any", text("any"));
    });

    let routes = router.route_list();
    assert_eq!(routes.len(), 6);
    assert!(routes.iter().all(|r| r.middleware.as_deref() == Some("auth")));
}

#[test]
fn handle_middleware_overrides_group() {
    let mut router = Router::new();
    router.group(GroupSettings::new().middleware("auth"), |r| {
        r.get("open", text("open")).middleware("log");
    });
    assert_eq!(router.routes()[0].middleware_name(), Some("log"));
}

#[test]
fn url_for_strips_leading_slash() {
    let mut router = Router::with_settings(RouterSettings::new().base_url("http://x/"));
    router.delete("/", text("deleted")).name("delete");
    router.get("/user/{id}", echo_params()).name("user.show");

    assert_eq!(router.url_for("delete", &HashMap::new()), "http://x/");
    assert_eq!(
        router.url_for("user.show", &subs(&[("id", "1")])),
        "http://x/user/1"
    );
}

#[test]
fn url_for_without_base_url() {
    let mut router = Router::new();
    router.get("/user/{id}", echo_params()).name("user.show");
    assert_eq!(router.url_for("user.show", &subs(&[("id", "4")])), "/user/4");
}

#[test]
fn first_registered_route_wins() {
    let mut router = Router::new();
    router.get("/post/{slug}", text("slug")).name("a");
    router.get("/post/{id}", text("id")).name("b");

    assert_eq!(router.find(Method::Get, "/post/12").expect("route").route.name, "a");
}

#[test]
fn find_is_repeatable() {
    let mut router = Router::new();
    router.get("/user/{id}/post/{post}", echo_params());

    let first = router.find(Method::Get, "/user/3/post/8").expect("route");
    let second = router.find(Method::Get, "/user/3/post/8").expect("route");
    assert_eq!(first.params, second.params);
    assert_eq!(first.params.values(), vec!["3", "8"]);
}

#[test]
fn pattern_strategy_rejects_dots() {
    let mut router =
        Router::with_settings(RouterSettings::new().strategy(MatchStrategy::Pattern));
    router.get("/files/{name}", echo_params());

    assert!(router.find(Method::Get, "/files/report-2024").is_some());
    assert!(router.find(Method::Get, "/files/report.pdf").is_none());
}

#[test]
fn name_last_and_middleware_last() {
    let mut router = Router::new();
    assert!(!router.name_last("home"));
    assert!(!router.middleware_last("auth"));

    router.get("/", text("home"));
    assert!(router.name_last("home"));
    assert!(router.middleware_last("auth"));
    assert_eq!(router.routes()[0].name, "home");
    assert_eq!(router.routes()[0].middleware_name(), Some("auth"));
}

#[test]
fn empty_registrations_are_skipped() {
    let mut router = Router::new();
    assert!(router.get("", text("nothing")).is_empty());
    assert!(router.get("/x", Handler::from("")).is_empty());
    assert!(router.routes().is_empty());
}

#[test]
fn route_list_serializes() {
    let mut router = Router::with_settings(RouterSettings::new().base_url("http://x/"));
    router.get("/", text("home")).name("home").middleware("log");
    router.redirect("/old", "/new");

    let json = serde_json::to_value(router.route_list()).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([
            {
                "method": "GET",
                "path": "/",
                "name": "home",
                "handler": "<closure>",
                "middleware": "log"
            },
            {
                "method": "GET",
                "path": "/old",
                "name": "",
                "handler": "redirect 301 /new",
                "redirect": "/new",
                "status": 301
            }
        ])
    );
}
