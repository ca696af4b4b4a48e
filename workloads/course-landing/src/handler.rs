//! Spin HTTP component.

use anyhow::anyhow;
use futures::SinkExt;
use spin_sdk::http::{Fields, IncomingRequest, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;

use landing_sdk::prelude::*;

use crate::app::{catalog_client, load_config, prepare, request_logger, stream_page, Reply};

#[http_component]
async fn handle(req: IncomingRequest, response_out: ResponseOutparam) {
    let Some(method) = convert_method(&req.method()) else {
        let reply = Reply::Full {
            status: 405,
            headers: vec![("allow".to_string(), "GET".to_string())],
            body: String::new(),
        };
        if let Err(e) = write_full(reply, response_out).await {
            eprintln!("Failed to write response: {}", e);
        }
        return;
    };

    let path = req.path_with_query().unwrap_or_default();
    let mut ctx = RequestContext::new(method, path);

    let (config, config_error) = match load_config(|key| spin_sdk::variables::get(key).ok()) {
        Ok(config) => (config, None),
        Err(e) => (LandingConfig::default(), Some(e)),
    };

    let logger = request_logger(&config, &ctx);
    if let Some(e) = config_error {
        logger
            .error_builder("Invalid configuration, using defaults")
            .field("error", e.to_string())
            .emit();
    }

    let mut metrics = MetricsCollector::new(ctx.request_id.clone());
    metrics.set_route(ctx.path.clone());

    let client = catalog_client(SpinTransport, &config);
    let reply = match SpinKvBackend::open_default() {
        Ok(store) => {
            let cache = RevalidatingCache::new(store, config.revalidate());
            prepare(&mut ctx, &config, &client, &cache, &logger, &mut metrics).await
        }
        Err(e) => {
            logger
                .warn_builder("Key-value store unavailable, not caching")
                .field("error", e.to_string())
                .emit();
            let cache = RevalidatingCache::new(InMemoryBackend::new(), config.revalidate());
            prepare(&mut ctx, &config, &client, &cache, &logger, &mut metrics).await
        }
    };

    let status = reply.status();
    let written = match reply {
        Reply::Page {
            headers,
            product,
            variant,
        } => {
            let result = async {
                let response = new_response(200, &headers)?;
                let mut sink = StreamingSink::new(response.take_body(), ctx.timing.clone());
                response_out.set(response);
                stream_page(&mut sink, &product, variant, &config, &mut metrics).await?;
                Ok::<_, anyhow::Error>(())
            };
            result.await
        }
        full @ Reply::Full { .. } => write_full(full, response_out).await,
    };

    if let Err(e) = written {
        logger
            .error_builder("Failed to write response")
            .field("error", e.to_string())
            .emit();
    }

    let summary = metrics.finalize(Some(status));
    logger
        .info_builder("Request completed")
        .field_u64("status", u64::from(status))
        .field_u64("total_us", summary.total_duration_us)
        .emit();
    logger.debug(&summary.to_summary());
}

async fn write_full(reply: Reply, response_out: ResponseOutparam) -> anyhow::Result<()> {
    let Reply::Full {
        status,
        headers,
        body,
    } = reply
    else {
        return Err(anyhow!("streamed replies are written by the page renderer"));
    };

    let response = new_response(status, &headers)?;
    let mut out = response.take_body();
    response_out.set(response);
    out.send(body.into_bytes())
        .await
        .map_err(|e| anyhow!("failed to write body: {}", e))
}

fn new_response(status: u16, headers: &[(String, String)]) -> anyhow::Result<OutgoingResponse> {
    let list: Vec<(String, Vec<u8>)> = headers
        .iter()
        .map(|(name, value)| (name.clone(), value.clone().into_bytes()))
        .collect();
    let fields =
        Fields::from_list(&list).map_err(|e| anyhow!("invalid response headers: {:?}", e))?;

    let response = OutgoingResponse::new(fields);
    response
        .set_status_code(status)
        .map_err(|_| anyhow!("invalid status code {}", status))?;
    Ok(response)
}

fn convert_method(method: &spin_sdk::http::Method) -> Option<Method> {
    use spin_sdk::http::Method as Spin;

    match method {
        Spin::Get => Some(Method::Get),
        Spin::Head => Some(Method::Head),
        Spin::Post => Some(Method::Post),
        Spin::Put => Some(Method::Put),
        Spin::Delete => Some(Method::Delete),
        Spin::Patch => Some(Method::Patch),
        Spin::Options => Some(Method::Options),
        _ => None,
    }
}
