#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use oxide_route::{Controller, Handler, Request, Response};
use serde_json::Value;

/// Handler returning a fixed body.
pub fn text(body: &'static str) -> Handler {
    Handler::closure(move |_| body)
}

/// Handler returning the bound values joined by `,`.
pub fn echo_params() -> Handler {
    Handler::closure(|req| req.params.values().join(","))
}

/// Handler counting its invocations.
pub fn counted(body: &'static str) -> (Handler, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let handler = Handler::closure(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        body
    });
    (handler, calls)
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Middleware that rejects every request.
pub fn deny_all(_req: &Request, _res: &mut Response) -> bool {
    false
}

pub fn body(response: &Response) -> String {
    response
        .body_string()
        .unwrap_or_else(|| panic!("Body is not UTF-8: {:?}", response.body))
}

/// A controller that needs nothing to be built.
#[derive(Debug, Default)]
pub struct PostController;

impl Controller for PostController {
    fn call(&self, action: &str, req: &Request) -> Value {
        match action {
            "index" => serde_json::json!([{ "id": 1 }, { "id": 2 }]),
            "show" => format!("post {}", req.params.at(0).unwrap_or_default()).into(),
            other => format!("post {other}").into(),
        }
    }
}

/// A controller built only through a factory.
pub struct MailController {
    pub sender: String,
}

impl Controller for MailController {
    fn call(&self, action: &str, _req: &Request) -> Value {
        format!("{action} from {}", self.sender).into()
    }
}
