use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::error::{AvailabilityError, Result};

/// W3C key under which element references travel on the wire.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const SCROLL_AND_CLICK: &str =
    "arguments[0].scrollIntoView({block:'center'}); arguments[0].click();";

#[derive(Debug, Clone, Copy)]
pub enum Locator<'a> {
    Css(&'a str),
    XPath(&'a str),
}

impl Locator<'_> {
    fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css selector",
            Self::XPath(_) => "xpath",
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Css(v) | Self::XPath(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId(pub String);

/// Thin client for a WebDriver endpoint (chromedriver, geckodriver, Selenium).
#[derive(Clone)]
pub struct WebDriverClient {
    http: Client,
    base_url: String,
}

impl WebDriverClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn create_session(&self, capabilities: Value) -> Result<Session> {
        let value = send(
            &self.http,
            Method::POST,
            &format!("{}/session", self.base_url),
            Some(json!({ "capabilities": capabilities })),
            "new session",
        )
        .await?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| AvailabilityError::WebDriver {
                command: "new session".into(),
                message: "response carried no sessionId".into(),
            })?
            .to_string();
        debug!(session = %id, "WebDriver session created");
        Ok(Session {
            http: self.http.clone(),
            url: format!("{}/session/{id}", self.base_url),
            id,
        })
    }
}

/// An open browser session. Call [`Session::delete`] to release it.
pub struct Session {
    http: Client,
    url: String,
    id: String,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        name: &str,
    ) -> Result<Value> {
        send(&self.http, method, &format!("{}{path}", self.url), body, name).await
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })), "navigate")
            .await?;
        Ok(())
    }

    pub async fn page_source(&self) -> Result<String> {
        let value = self.command(Method::GET, "/source", None, "page source").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AvailabilityError::WebDriver {
                command: "page source".into(),
                message: "page source was not a string".into(),
            })
    }

    /// Find one element; `Ok(None)` when nothing matches.
    pub async fn find_element(&self, locator: Locator<'_>) -> Result<Option<ElementId>> {
        let body = json!({ "using": locator.strategy(), "value": locator.value() });
        match self
            .command(Method::POST, "/element", Some(body), "find element")
            .await
        {
            Ok(value) => value
                .get(ELEMENT_KEY)
                .and_then(Value::as_str)
                .map(|id| Some(ElementId(id.to_string())))
                .ok_or_else(|| AvailabilityError::WebDriver {
                    command: "find element".into(),
                    message: "response carried no element reference".into(),
                }),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Poll for an element until `timeout` elapses. Always tries at least once.
    pub async fn wait_for_element(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Option<ElementId>> {
        let started = Instant::now();
        loop {
            if let Some(element) = self.find_element(locator).await? {
                return Ok(Some(element));
            }
            if started.elapsed() + poll_interval > timeout {
                return Ok(None);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    pub async fn click(&self, element: &ElementId) -> Result<()> {
        self.command(
            Method::POST,
            &format!("/element/{}/click", element.0),
            Some(json!({})),
            "click",
        )
        .await?;
        Ok(())
    }

    /// Scroll the element into view and click it from script, which gets past
    /// overlays that intercept native clicks.
    pub async fn script_click(&self, element: &ElementId) -> Result<()> {
        let body = json!({
            "script": SCROLL_AND_CLICK,
            "args": [{ ELEMENT_KEY: element.0 }],
        });
        self.command(Method::POST, "/execute/sync", Some(body), "execute script")
            .await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<()> {
        self.command(Method::DELETE, "", None, "delete session").await?;
        debug!(session = %self.id, "WebDriver session closed");
        Ok(())
    }
}

async fn send(
    http: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
    name: &str,
) -> Result<Value> {
    trace!(command = name, url, "WebDriver request");
    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await?;
    let status = response.status();
    let payload: Value = response.json().await?;
    let value = payload.get("value").cloned().unwrap_or(Value::Null);

    if !status.is_success() {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let message = value.get("message").and_then(Value::as_str).unwrap_or("");
        return Err(AvailabilityError::WebDriver {
            command: name.to_string(),
            message: format!("{error}: {message} (HTTP {status})"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_strategies() {
        assert_eq!(Locator::Css("a").strategy(), "css selector");
        assert_eq!(Locator::XPath("//a").strategy(), "xpath");
        assert_eq!(Locator::XPath("//a").value(), "//a");
    }

    #[tokio::test]
    async fn missing_element_is_none_not_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/session"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(json!({"value": {"sessionId": "s1", "capabilities": {}}})),
            )
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/session/s1/element"))
            .respond_with(wiremock::ResponseTemplate::new(404).set_body_json(json!({
                "value": {"error": "no such element", "message": "Unable to locate element"}
            })))
            .mount(&server)
            .await;

        let client = WebDriverClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let session = client.create_session(json!({})).await.unwrap();
        assert_eq!(session.id(), "s1");
        let found = session.find_element(Locator::Css("#nope")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn other_webdriver_errors_propagate() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/session"))
            .respond_with(wiremock::ResponseTemplate::new(500).set_body_json(json!({
                "value": {"error": "session not created", "message": "Chrome failed to start"}
            })))
            .mount(&server)
            .await;

        let client = WebDriverClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.create_session(json!({})).await.err().unwrap();
        assert!(err.to_string().contains("session not created"));
        assert!(err.to_string().contains("Chrome failed to start"));
    }
}
