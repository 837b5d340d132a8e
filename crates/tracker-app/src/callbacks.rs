use crate::component::Node;
use crate::config::AppConfig;
use crate::layout::{self, INPUT_ID, OUTPUT_ID, PAGE_CONTENT_ID};
use crate::router::{Bindings, Prop, Router, UpdateError};
use crate::summary::build_summary;
use log::{error, trace};
use std::sync::Arc;
use tracker_fetch::api::QuoteFetcher;

/// `/` renders the ticker page; nothing else is routed.
pub fn router() -> Router {
    Router::new().route("/", layout::index_page)
}

/// Page content for `path`; unrouted paths get an empty container.
pub fn display_page(router: &Router, path: &str) -> Node {
    router
        .resolve(path)
        .unwrap_or_else(|| Node::Text(String::new()))
}

/// Children of the output container for the ticker typed so far.
///
/// Any failure is logged, delayed by `config.error_delay`, and reported as
/// [`UpdateError::NoUpdate`] so the previous view stays on screen.
pub async fn update_graph(
    fetcher: &dyn QuoteFetcher,
    config: &AppConfig,
    input: &str,
) -> Result<Node, UpdateError> {
    match build_summary(fetcher, config, input).await {
        Ok(outcome) => Ok(layout::outcome_view(&outcome)),
        Err(e) => {
            error!("Error occurred: {e}");
            tokio::time::sleep(config.error_delay).await;
            Err(UpdateError::NoUpdate(e.to_string()))
        }
    }
}

/// Wire the page:
///
/// ```text
/// url.pathname -> page-content.children
/// input.value  -> output_graph.children
/// ```
pub fn bindings(router: Arc<Router>, fetcher: Arc<dyn QuoteFetcher>, config: AppConfig) -> Bindings {
    let config = Arc::new(config);

    Bindings::new()
        .bind(
            Prop::new("url", "pathname"),
            Prop::new(PAGE_CONTENT_ID, "children"),
            move |path: String| {
                let router = router.clone();
                async move { Ok::<_, UpdateError>(display_page(&router, &path)) }
            },
        )
        .bind(
            Prop::new(INPUT_ID, "value"),
            Prop::new(OUTPUT_ID, "children"),
            move |value: String| {
                let fetcher = fetcher.clone();
                let config = config.clone();
                async move {
                    trace!("Ticker input changed: {value:?}");
                    update_graph(fetcher.as_ref(), &config, &value).await
                }
            },
        )
}
