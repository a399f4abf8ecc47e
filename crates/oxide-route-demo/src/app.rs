//! The demo application: a controller with an injected service and the
//! route table exercising every registration form.

use oxide_route::{
    AuthMiddleware, ConstructionError, Controller, ControllerClass, GroupSettings, Handler,
    LoggingMiddleware, Method, Request, Router, RouterSettings,
};
use serde_json::{json, Value};

/// Name the demo controller is registered under.
pub const CONTROLLER: &str = "DemoController";

/// A dependency handed to the controller by the factory.
#[derive(Debug, Default)]
pub struct AnotherClass;

impl AnotherClass {
    pub fn test(&self) -> Value {
        json!(["test", "from", "another class"])
    }
}

/// Controller whose only constructor takes an [`AnotherClass`].
pub struct DemoController {
    another: AnotherClass,
}

impl DemoController {
    pub fn new(another: AnotherClass) -> Self {
        Self { another }
    }
}

impl Controller for DemoController {
    fn call(&self, action: &str, req: &Request) -> Value {
        match action {
            "index" => self.another.test(),
            "simpleIndex" => format!("Simple Index {}", req.params.at(0).unwrap_or_default()).into(),
            "simpleIndex2" => "Simple Index 2".into(),
            _ => Value::Null,
        }
    }
}

/// Resolves the demo's controller classes.
fn resolve(class: &str) -> Result<Box<dyn Controller>, ConstructionError> {
    match class {
        CONTROLLER => Ok(Box::new(DemoController::new(AnotherClass))),
        other => Err(format!("cannot resolve dependencies of {other}").into()),
    }
}

fn method_echo(label: &'static str) -> Handler {
    Handler::closure(move |req| format!("{label} content. Server request method: {}", req.method))
}

/// Builds the demo router.
pub fn build(settings: RouterSettings) -> Router {
    let mut router = Router::with_settings(settings);

    router
        .controller(ControllerClass::new(
            CONTROLLER,
            &["index", "simpleIndex", "simpleIndex2"],
        ))
        .handler_factory(resolve)
        .register_middleware("auth", AuthMiddleware::new())
        .register_middleware("log", LoggingMiddleware);

    router.get(
        "/",
        Handler::closure(|req| format!("default. Server request method: {}", req.method)),
    );
    router
        .get("test/{test}", method_echo("Get test route"))
        .middleware("auth");
    router.get(
        ["about", "contact"],
        Handler::closure(|_| json!({ "name": "Test bangla char", "age": 45 })),
    );
    router.get(
        "/user/{userId}/edit/{another}",
        Handler::closure(|req| {
            format!(
                "get content {{userId}}: {} {{another}}: {}",
                req.params.at(0).unwrap_or_default(),
                req.params.at(1).unwrap_or_default()
            )
        }),
    );

    router.post("test", method_echo("post"));
    router.put("test", method_echo("put"));
    router.patch("test", method_echo("patch"));
    router.delete("test", method_echo("delete"));
    router.options("test", method_echo("options"));
    router.match_methods(&[Method::Get, Method::Post], "getpost", method_echo("GET POST"));
    router.any("any", method_echo("any")).middleware("log");

    router
        .get("controller", format!("{CONTROLLER}@index"))
        .name("controller.index");
    router
        .get("simple/{id}", format!("{CONTROLLER}@simpleIndex"))
        .name("controller.simple");
    router.get("missing", format!("{CONTROLLER}@missing"));

    router.crud("/crud", method_echo("crud"));

    router.redirect("/redirect", "/redirected");
    router.get("/redirected", Handler::closure(|_| "redirected!"));
    router.redirect_with_status("/redirect-another", "http://habibhadi.com", 302);

    router.get(
        "name/{name?}",
        Handler::closure(|req| format!("Your name is - {}", req.params.at(0).unwrap_or("Default name"))),
    );

    router.group(
        GroupSettings::new()
            .middleware("auth")
            .url_prefix("user/{userId}")
            .name_prefix("user."),
        |r| {
            r.get(
                "profile",
                Handler::closure(|req| {
                    format!("profile route: User id: {}", req.params.at(0).unwrap_or_default())
                }),
            )
            .name("profile");
            r.get(
                "action/{actionId}",
                Handler::closure(|req| {
                    format!(
                        "action route: User id: {} and action id {}",
                        req.params.at(0).unwrap_or_default(),
                        req.params.at(1).unwrap_or_default()
                    )
                }),
            )
            .name("action");
        },
    );

    router
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn demo() -> Router {
        build(RouterSettings::new().base_url("http://localhost/demo/"))
    }

    #[test]
    fn test_home_and_params() {
        let router = demo();

        let res = router.run("GET", "http://localhost/demo/");
        assert_eq!(res.body_string().as_deref(), Some("default. Server request method: GET"));

        let res = router.run("GET", "http://localhost/demo/user/7/edit/3");
        assert_eq!(
            res.body_string().as_deref(),
            Some("get content {userId}: 7 {another}: 3")
        );
    }

    #[test]
    fn test_controller_through_factory() {
        let router = demo();

        let res = router.run("GET", "http://localhost/demo/controller");
        assert_eq!(res.status, 200);
        assert_eq!(
            res.get_header("Content-Type"),
            Some("application/json; charset=UTF-8")
        );

        let res = router.run("GET", "http://localhost/demo/simple/12");
        assert_eq!(res.body_string().as_deref(), Some("Simple Index 12"));

        let res = router.run("GET", "http://localhost/demo/missing");
        assert_eq!(res.status, 404);
        assert_eq!(
            res.body_string().as_deref(),
            Some("missing method doesn't exist in DemoController")
        );
    }

    #[test]
    fn test_controller_without_factory() {
        let router = build(RouterSettings::new().use_di(false));
        let res = router.run("GET", "/controller");
        assert_eq!(res.status, 500);
        assert_eq!(
            res.body_string().as_deref(),
            Some("DemoController has no default constructor")
        );
    }

    #[test]
    fn test_group_routes() {
        let router = demo();
        assert_eq!(router.run("GET", "/user/5/profile").status, 400);

        let req = Request::from_url("GET", "/user/5/action/2", router.base_url())
            .header("Authorization", "Bearer demo");
        let res = router.dispatch(req);
        assert_eq!(
            res.body_string().as_deref(),
            Some("action route: User id: 5 and action id 2")
        );

        let subs = HashMap::from([
            ("userId".to_string(), "5".to_string()),
            ("actionId".to_string(), "2".to_string()),
        ]);
        assert_eq!(
            router.url_for("user.action", &subs),
            "http://localhost/demo/user/5/action/2"
        );
    }

    #[test]
    fn test_optional_name() {
        let router = demo();
        assert_eq!(
            router.run("GET", "/name").body_string().as_deref(),
            Some("Your name is - Default name")
        );
        assert_eq!(
            router.run("GET", "/name/ada").body_string().as_deref(),
            Some("Your name is - ada")
        );
    }

    #[test]
    fn test_redirects() {
        let router = demo();

        let res = router.run("GET", "/redirect");
        assert_eq!(res.status, 301);
        assert_eq!(res.get_header("Location"), Some("http://localhost/demo/redirected"));

        let res = router.run("GET", "/redirect-another");
        assert_eq!(res.status, 302);
        assert_eq!(res.get_header("Location"), Some("http://habibhadi.com"));
    }
}
