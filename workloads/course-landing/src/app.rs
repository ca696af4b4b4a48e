//! Request flow: routing, configuration, product lookup and streaming.
//!
//! Everything here is platform-independent; `handler.rs` only adapts it to
//! Spin's request and response types.

use std::fmt::Display;
use std::time::Duration;

use futures::Sink;
use landing_sdk::prelude::*;

use crate::data::Product;
use crate::page::{page_shell, render_error_page, render_regions, PageVariant};

/// Configuration compiled into the component.
pub const EMBEDDED_CONFIG: &str = include_str!("../landing.toml");

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

/// What a request path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Page(PageVariant),
    /// Upstream document passed through as JSON. Fetched with the same
    /// `lang` query and platform header as the pages, so both share one
    /// cache entry; the bare `/products/{slug}` URL is never requested.
    Data,
    NotFound,
    MethodNotAllowed,
}

/// Resolve a route. Only GET is served.
pub fn route(method: Method, path: &str) -> Route {
    if method != Method::Get {
        return Route::MethodNotAllowed;
    }
    match path {
        "/" => Route::Page(PageVariant::Static),
        "/product" => Route::Page(PageVariant::Interactive),
        "/api/data" => Route::Data,
        _ => Route::NotFound,
    }
}

/// Load the embedded configuration, then apply per-key overrides.
pub fn load_config(lookup: impl Fn(&str) -> Option<String>) -> Result<LandingConfig, ConfigError> {
    let mut config = LandingConfig::from_toml_str(EMBEDDED_CONFIG)?;
    for &key in LandingConfig::KEYS {
        if let Some(value) = lookup(key) {
            config.set(key, &value)?;
        }
    }
    config.validate()?;
    Ok(config)
}

/// Logger configured from `log_level` / `log_format`; unknown values fall back
/// to `info` and JSON.
pub fn request_logger(config: &LandingConfig, ctx: &RequestContext) -> StructuredLogger {
    StructuredLogger::new(ctx.request_id.clone())
        .with_route(ctx.path.clone())
        .with_min_level(LogLevel::parse(&config.log_level).unwrap_or(LogLevel::Info))
        .with_format(LogFormat::parse(&config.log_format).unwrap_or_default())
}

/// Fetch client for the catalog API with the platform header set.
pub fn catalog_client<T: HttpTransport>(transport: T, config: &LandingConfig) -> FetchClient<T> {
    FetchClient::new(transport)
        .with_default_header("X-TENMS-SOURCE-PLATFORM", config.source_platform.clone())
}

/// Get the product document through the revalidation cache.
///
/// Only bodies that decode as a `Product` are stored, so a malformed
/// upstream response is refetched on the next request.
pub async fn load_document<T, B>(
    client: &FetchClient<T>,
    cache: &RevalidatingCache<B>,
    config: &LandingConfig,
) -> anyhow::Result<CacheOutcome>
where
    T: HttpTransport,
    B: CacheBackend,
{
    let url = config.product_url();
    let url = url.as_str();
    cache
        .get_or_fetch_with(
            &config.cache_key(),
            move || async move { client.fetch_text(url).await.map_err(anyhow::Error::from) },
            |body| Product::from_response(body).is_ok(),
        )
        .await
}

/// Response to write back.
#[derive(Debug)]
pub enum Reply {
    /// A product page, streamed region by region.
    Page {
        headers: Vec<(String, String)>,
        product: Box<Product>,
        variant: PageVariant,
    },
    /// A complete body.
    Full {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
}

impl Reply {
    pub fn status(&self) -> u16 {
        match self {
            Self::Page { .. } => 200,
            Self::Full { status, .. } => *status,
        }
    }

    pub fn headers(&self) -> &[(String, String)] {
        match self {
            Self::Page { headers, .. } | Self::Full { headers, .. } => headers,
        }
    }
}

/// Route the request and load whatever it needs.
pub async fn prepare<T, B>(
    ctx: &mut RequestContext,
    config: &LandingConfig,
    client: &FetchClient<T>,
    cache: &RevalidatingCache<B>,
    logger: &StructuredLogger,
    metrics: &mut MetricsCollector,
) -> Reply
where
    T: HttpTransport,
    B: CacheBackend,
{
    let variant = match route(ctx.method, &ctx.path) {
        Route::MethodNotAllowed => {
            let mut reply = error_reply(405, "Method not allowed", ctx, config);
            if let Reply::Full { headers, .. } = &mut reply {
                headers.push(("allow".to_string(), "GET".to_string()));
            }
            return reply;
        }
        Route::NotFound => return error_reply(404, "Page not found", ctx, config),
        Route::Data => None,
        Route::Page(variant) => Some(variant),
    };

    let url = config.product_url();
    ctx.timing.mark_fetch_start();
    let result = load_document(client, cache, config).await;
    ctx.timing.mark_fetch_done();
    let fetch_time = ctx.timing.fetch_duration().unwrap_or(Duration::ZERO);

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            metrics.record_fetch_error(&url, fetch_time, e.to_string());
            logger
                .error_builder("Product fetch failed")
                .field("url", url.as_str())
                .field("error", e.to_string())
                .emit();
            return upstream_failure(variant.is_none(), ctx, config);
        }
    };

    metrics.record_fetch(&url, fetch_time, outcome.status.to_string(), outcome.body.len());
    if let Some(error) = &outcome.backend_error {
        logger
            .warn_builder("Cache backend unavailable")
            .field("error", error.as_str())
            .emit();
    }
    logger
        .info_builder("Product document loaded")
        .field("cache", outcome.status.to_string())
        .field_u64("age_secs", outcome.age_secs)
        .duration_ms("fetch_ms", fetch_time)
        .emit();

    let Some(variant) = variant else {
        return Reply::Full {
            status: 200,
            headers: cached_headers(JSON, ctx, config, &outcome),
            body: outcome.body,
        };
    };

    match Product::from_response(&outcome.body) {
        Ok(product) => {
            logger
                .debug_builder("Product decoded")
                .field_u64("sections", product.sections.len() as u64)
                .field_u64("media", product.media.len() as u64)
                .emit();
            Reply::Page {
                headers: cached_headers(HTML, ctx, config, &outcome),
                product: Box::new(product),
                variant,
            }
        }
        Err(e) => {
            logger
                .error_builder("Product document malformed")
                .field("error", e.to_string())
                .emit();
            upstream_failure(false, ctx, config)
        }
    }
}

/// Stream a product page: shell first, then each region, then the closing.
pub async fn stream_page<S, E>(
    sink: &mut StreamingSink<S, E>,
    product: &Product,
    variant: PageVariant,
    config: &LandingConfig,
    metrics: &mut MetricsCollector,
) -> Result<(), PageError>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    let shell = page_shell(product, variant, config);
    sink.send_shell(&shell.render_opening()).await?;
    metrics.record_shell_sent();

    for region in render_regions(product, variant, config) {
        metrics.record_section_start(region.name);
        sink.send_section(region.name, &region.html).await?;
        metrics.record_section_sent(region.name, region.html.len());
    }

    sink.finish(&shell.render_closing()).await
}

fn base_headers(content_type: &str, ctx: &RequestContext) -> Vec<(String, String)> {
    vec![
        ("content-type".to_string(), content_type.to_string()),
        (
            header_names::X_REQUEST_ID.to_string(),
            ctx.request_id.to_string(),
        ),
    ]
}

fn cached_headers(
    content_type: &str,
    ctx: &RequestContext,
    config: &LandingConfig,
    outcome: &CacheOutcome,
) -> Vec<(String, String)> {
    let mut headers = base_headers(content_type, ctx);
    headers.extend(
        CacheHeadersBuilder::new()
            .from_policy(&RouteCachePolicy::revalidate_every(config.revalidate()))
            .etag_for(&outcome.body)
            .cache_status(outcome.status, outcome.age_secs)
            .build(),
    );
    headers
}

fn error_reply(status: u16, message: &str, ctx: &RequestContext, config: &LandingConfig) -> Reply {
    let mut headers = base_headers(HTML, ctx);
    headers.extend(
        CacheHeadersBuilder::new()
            .from_policy(&RouteCachePolicy::none())
            .build(),
    );
    Reply::Full {
        status,
        headers,
        body: render_error_page(status, message, config),
    }
}

fn upstream_failure(json: bool, ctx: &RequestContext, config: &LandingConfig) -> Reply {
    const MESSAGE: &str = "Course information is temporarily unavailable";
    if !json {
        return error_reply(502, MESSAGE, ctx, config);
    }

    let mut headers = base_headers(JSON, ctx);
    headers.push(("cache-control".to_string(), "no-store".to_string()));
    Reply::Full {
        status: 502,
        headers,
        body: serde_json::json!({ "error": MESSAGE }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    fn fixture_body() -> String {
        json!({
            "code": 200,
            "message": "success",
            "data": {
                "slug": "ielts-course",
                "title": "IELTS Course",
                "description": "<p>Complete preparation</p>",
                "media": [{ "name": "preview_gallery", "resource_type": "video", "resource_value": "zrlYnaZftEQ", "thumbnail_url": "https://cdn/t.jpg" }],
                "checklist": [{ "text": "Total enrolled 32995", "icon": "", "color": "black", "list_page_visibility": true }],
                "cta_text": { "name": "Enroll", "value": "enroll" },
                "sections": [
                    { "type": "features", "name": "How the course is laid out", "values": [
                        { "id": "1", "icon": "", "title": "Live classes", "subtitle": "Every week" },
                        { "id": "2", "icon": "", "title": "Mock tests", "subtitle": "Full length" }
                    ]},
                    { "type": "offers", "values": [] }
                ]
            }
        })
        .to_string()
    }

    struct Harness {
        config: LandingConfig,
        client: FetchClient<StaticTransport>,
        cache: RevalidatingCache<InMemoryBackend>,
    }

    impl Harness {
        fn new(transport: StaticTransport) -> Self {
            let config = LandingConfig::default();
            Self {
                client: catalog_client(transport, &config),
                cache: RevalidatingCache::new(InMemoryBackend::new(), config.revalidate()),
                config,
            }
        }

        fn prepare(&self, method: Method, path: &str) -> Reply {
            let mut ctx = RequestContext::new(method, path);
            let logger = request_logger(&self.config, &ctx).with_min_level(LogLevel::Error);
            let mut metrics = MetricsCollector::new(ctx.request_id.clone());
            block_on(prepare(
                &mut ctx,
                &self.config,
                &self.client,
                &self.cache,
                &logger,
                &mut metrics,
            ))
        }
    }

    fn header<'a>(reply: &'a Reply, name: &str) -> Option<&'a str> {
        reply
            .headers()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_routes() {
        assert_eq!(route(Method::Get, "/"), Route::Page(PageVariant::Static));
        assert_eq!(route(Method::Get, "/product"), Route::Page(PageVariant::Interactive));
        assert_eq!(route(Method::Get, "/api/data"), Route::Data);
        assert_eq!(route(Method::Get, "/checkout"), Route::NotFound);
        assert_eq!(route(Method::Post, "/"), Route::MethodNotAllowed);
        assert_eq!(route(Method::Head, "/product"), Route::MethodNotAllowed);
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        assert_eq!(load_config(|_| None).unwrap(), LandingConfig::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = load_config(|key| match key {
            "revalidate_secs" => Some("120".to_string()),
            "lang" => Some("bn".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.revalidate_secs, 120);
        assert!(config.product_url().ends_with("/products/ielts-course?lang=bn"));

        let bad = load_config(|key| (key == "revalidate_secs").then(|| "soon".to_string()));
        assert!(matches!(bad, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_page_request_fetches_with_platform_header() {
        let harness = Harness::new(StaticTransport::ok(fixture_body()));
        let reply = harness.prepare(Method::Get, "/");

        assert_eq!(reply.status(), 200);
        assert_eq!(header(&reply, "content-type"), Some(HTML));
        assert_eq!(header(&reply, "x-cache-status"), Some("MISS"));
        assert_eq!(
            header(&reply, "cache-control"),
            Some("public, max-age=60, stale-while-revalidate=60")
        );
        assert!(header(&reply, "etag").is_some());
        assert!(header(&reply, "x-request-id").is_some());

        let requests = harness.client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://api.10minuteschool.com/discovery-service/api/v1/products/ielts-course?lang=en"
        );
        assert_eq!(requests[0].header_value("X-TENMS-SOURCE-PLATFORM"), Some("web"));

        match reply {
            Reply::Page { product, variant, .. } => {
                assert_eq!(product.title, "IELTS Course");
                assert_eq!(variant, PageVariant::Static);
            }
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[test]
    fn test_second_request_within_interval_is_a_hit() {
        let harness = Harness::new(StaticTransport::ok(fixture_body()));
        harness.prepare(Method::Get, "/");
        let reply = harness.prepare(Method::Get, "/product");

        assert_eq!(header(&reply, "x-cache-status"), Some("HIT"));
        assert_eq!(harness.client.transport().requests().len(), 1);
    }

    #[test]
    fn test_data_route_passes_document_through() {
        let harness = Harness::new(StaticTransport::ok(fixture_body()));
        let reply = harness.prepare(Method::Get, "/api/data");

        assert_eq!(header(&reply, "content-type"), Some(JSON));
        let requests = harness.client.transport().requests();
        assert!(requests[0].url.ends_with("/products/ielts-course?lang=en"));
        assert_eq!(requests[0].header_value("X-TENMS-SOURCE-PLATFORM"), Some("web"));
        match reply {
            Reply::Full { status, body, .. } => {
                assert_eq!(status, 200);
                assert_eq!(body, fixture_body());
            }
            other => panic!("expected a full body, got {:?}", other),
        }
    }

    #[test]
    fn test_upstream_failure_is_502() {
        let harness = Harness::new(StaticTransport::with_status(500, "oops"));

        let page = harness.prepare(Method::Get, "/product");
        assert_eq!(page.status(), 502);
        assert_eq!(header(&page, "cache-control"), Some("no-store"));

        let data = harness.prepare(Method::Get, "/api/data");
        assert_eq!(data.status(), 502);
        assert_eq!(header(&data, "content-type"), Some(JSON));
    }

    #[test]
    fn test_malformed_document_is_502_and_not_cached() {
        let harness = Harness::new(StaticTransport::ok(r#"{"code":200,"message":"ok"}"#));
        assert_eq!(harness.prepare(Method::Get, "/").status(), 502);

        let retry = harness.prepare(Method::Get, "/");
        assert_eq!(retry.status(), 502);
        assert_eq!(harness.client.transport().requests().len(), 2);
        assert!(harness.cache.backend().is_empty());
    }

    #[test]
    fn test_not_found_and_method_not_allowed_skip_fetch() {
        let harness = Harness::new(StaticTransport::ok(fixture_body()));

        assert_eq!(harness.prepare(Method::Get, "/nope").status(), 404);
        let reply = harness.prepare(Method::Post, "/");
        assert_eq!(reply.status(), 405);
        assert_eq!(header(&reply, "allow"), Some("GET"));
        assert!(harness.client.transport().requests().is_empty());
    }

    #[test]
    fn test_stream_page_sends_shell_regions_and_closing() {
        let product = Product::from_response(&fixture_body()).unwrap();
        let config = LandingConfig::default();
        let mut metrics = MetricsCollector::new(RequestId::from_string("req-1"));
        let mut sink: StreamingSink<Vec<Vec<u8>>, std::convert::Infallible> =
            StreamingSink::new(Vec::new(), TimingContext::new());

        block_on(stream_page(
            &mut sink,
            &product,
            PageVariant::Interactive,
            &config,
            &mut metrics,
        ))
        .unwrap();

        assert_eq!(sink.sections_sent(), ["hero", "features", "sidebar"]);
        assert_eq!(sink.phase(), LifecyclePhase::Completion);

        let chunks = sink.into_inner();
        assert_eq!(chunks.len(), 5);
        let html = String::from_utf8(chunks.concat()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches(r#"class="feature-card""#).count(), 2);
        assert!(html.contains(r#"data-widget="sidebar""#));
        assert!(html.ends_with("</html>"));

        let summary = metrics.finalize(Some(200));
        assert_eq!(summary.sections.len(), 3);
        assert!(summary.time_to_shell_us.is_some());
    }
}
