use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use render::{render_country, render_merge, RenderError, RenderOptions};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::AppState;

/// Query string shared by both SVG endpoints. Numbers are kept as text so a
/// malformed value falls back to its default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SvgQuery {
    pub a: Option<String>,
    pub b: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
    pub pad: Option<String>,
    pub stroke: Option<String>,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: Option<String>,
    pub fill: Option<String>,
    pub debug: Option<String>,
}

impl SvgQuery {
    fn code_a(&self) -> Option<&str> {
        non_empty(self.a.as_deref())
    }

    fn code_b(&self) -> Option<&str> {
        non_empty(self.b.as_deref())
    }

    pub fn options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            width: number(self.w.as_deref(), defaults.width),
            height: number(self.h.as_deref(), defaults.height),
            pad: number(self.pad.as_deref(), defaults.pad),
            stroke: self.stroke.clone().unwrap_or(defaults.stroke),
            stroke_width: number(self.stroke_width.as_deref(), defaults.stroke_width),
            fill: self.fill.clone().unwrap_or(defaults.fill),
            debug: self.debug.as_deref() == Some("1"),
        }
        .sanitized()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn number(value: Option<&str>, default: f64) -> f64 {
    non_empty(value)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn svg_response(svg: String) -> Response {
    let mut resp = (StatusCode::OK, svg).into_response();
    resp.headers_mut().insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("image/svg+xml"),
    );
    resp
}

fn render_error(err: RenderError) -> Response {
    warn!("render failed: {err}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

pub async fn country_svg(State(state): State<AppState>, Query(query): Query<SvgQuery>) -> Response {
    let Some(a) = query.code_a() else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Missing required query param ?a=CountryA",
        );
    };

    let catalog = match state.countries.catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("country data unavailable: {err}");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };
    let Some(feature) = catalog.find_by_iso(a) else {
        return api_error(StatusCode::NOT_FOUND, format!("Country not found: {a}"));
    };

    match render_country(feature, &query.options()) {
        Ok(svg) => svg_response(svg),
        Err(err) => render_error(err),
    }
}

pub async fn merge_countries(
    State(state): State<AppState>,
    Query(query): Query<SvgQuery>,
) -> Response {
    let Some(a) = query.code_a() else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Missing required query param ?a=CountryA",
        );
    };

    let catalog = match state.countries.catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("country data unavailable: {err}");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };
    let Some(fa) = catalog.find_by_iso(a) else {
        return api_error(StatusCode::NOT_FOUND, format!("Country not found: {a}"));
    };
    let fb = match query.code_b() {
        Some(b) => match catalog.find_by_iso(b) {
            Some(fb) => Some(fb),
            None => return api_error(StatusCode::NOT_FOUND, format!("Country not found: {b}")),
        },
        None => None,
    };

    match render_merge(fa, fb, &query.options(), state.union.as_ref()) {
        Ok(outcome) => svg_response(outcome.svg),
        Err(err) => render_error(err),
    }
}

pub async fn healthz(State(state): State<AppState>) -> Response {
    let body = json!({
        "status": "ok",
        "countries_loaded": state.countries.is_loaded(),
    });
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::Response;
    use catalog::bundled_iso_table;
    use geometry::{GeoUnion, MultiPolygon, UnionError, UnionPrimitive};
    use serde_json::Value;

    use super::{country_svg, healthz, merge_countries, SvgQuery};
    use crate::countries::CountryData;
    use crate::data_sources::MemorySource;
    use crate::AppState;

    const WORLD: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"250","properties":{"name":"France"},
         "geometry":{"type":"Polygon","coordinates":[[[-4,43],[7,43],[7,50],[-4,50],[-4,43]]]}},
        {"type":"Feature","id":"276","properties":{"name":"Germany"},
         "geometry":{"type":"MultiPolygon","coordinates":[
            [[[6,47],[14,47],[14,55],[6,55],[6,47]]],
            [[[11,54.3],[11.5,54.3],[11.5,54.6],[11,54.6],[11,54.3]]]
         ]}}
    ]}"#;

    struct Failing;

    impl UnionPrimitive for Failing {
        fn union(&self, _: &MultiPolygon, _: &MultiPolygon) -> Result<MultiPolygon, UnionError> {
            Err(UnionError::Primitive("self-intersection".to_string()))
        }
    }

    fn state_with(source: Arc<MemorySource>, union: Arc<dyn UnionPrimitive + Send + Sync>) -> AppState {
        AppState {
            countries: Arc::new(CountryData::new(
                source,
                "countries",
                bundled_iso_table().clone(),
            )),
            union,
        }
    }

    fn state() -> AppState {
        state_with(Arc::new(MemorySource::with_payload(WORLD)), Arc::new(GeoUnion))
    }

    fn query(a: Option<&str>, b: Option<&str>) -> SvgQuery {
        SvgQuery {
            a: a.map(str::to_string),
            b: b.map(str::to_string),
            ..SvgQuery::default()
        }
    }

    async fn body_text(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn error_message(resp: Response) -> String {
        let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    fn content_type(resp: &Response) -> &str {
        resp.headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[test]
    fn query_options_follow_service_defaults() {
        let opts = SvgQuery::default().options();
        assert_eq!((opts.width, opts.height, opts.pad), (800.0, 520.0, 16.0));
        assert!(!opts.debug);

        let custom = SvgQuery {
            w: Some("0".to_string()),
            h: Some("abc".to_string()),
            pad: Some("-3".to_string()),
            stroke_width: Some("1.5".to_string()),
            fill: Some("#f00".to_string()),
            debug: Some("1".to_string()),
            ..SvgQuery::default()
        }
        .options();
        assert_eq!(custom.width, 1.0);
        assert_eq!(custom.height, 520.0);
        assert_eq!(custom.pad, 0.0);
        assert_eq!(custom.stroke_width, 1.5);
        assert_eq!(custom.fill, "#f00");
        assert!(custom.debug);

        let not_debug = SvgQuery {
            debug: Some("true".to_string()),
            ..SvgQuery::default()
        };
        assert!(!not_debug.options().debug);
    }

    #[tokio::test]
    async fn country_svg_renders_known_country() {
        let resp = country_svg(State(state()), Query(query(Some("fr"), None))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(content_type(&resp), "image/svg+xml");
        let svg = body_text(resp).await;
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\""));
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[tokio::test]
    async fn missing_code_is_a_bad_request() {
        let resp = country_svg(State(state()), Query(query(None, None))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_message(resp).await,
            "Missing required query param ?a=CountryA"
        );

        let resp = merge_countries(State(state()), Query(query(Some(" "), Some("DE")))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_codes_are_not_found() {
        let resp = country_svg(State(state()), Query(query(Some("IT"), None))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_message(resp).await, "Country not found: IT");

        let resp = merge_countries(State(state()), Query(query(Some("FR"), Some("XX")))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_message(resp).await, "Country not found: XX");
    }

    #[tokio::test]
    async fn merge_renders_union() {
        let resp = merge_countries(State(state()), Query(query(Some("FR"), Some("DE")))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let svg = body_text(resp).await;
        assert_eq!(svg.matches("<path").count(), 1);

        let single = merge_countries(State(state()), Query(query(Some("DE"), None))).await;
        assert_eq!(single.status(), StatusCode::OK);
        assert_eq!(body_text(single).await.matches("<path").count(), 1);
    }

    #[tokio::test]
    async fn failed_union_is_server_error_unless_debugging() {
        let state = state_with(Arc::new(MemorySource::with_payload(WORLD)), Arc::new(Failing));

        let resp = merge_countries(State(state.clone()), Query(query(Some("FR"), Some("DE")))).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error_message(resp).await,
            "Union failed for these inputs. Try debug=1 to inspect outlines."
        );

        let debug = SvgQuery {
            debug: Some("1".to_string()),
            ..query(Some("FR"), Some("DE"))
        };
        let resp = merge_countries(State(state), Query(debug)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let svg = body_text(resp).await;
        assert_eq!(svg.matches("stroke=\"#bbb\"").count(), 2);
    }

    #[tokio::test]
    async fn healthz_reports_data_state() {
        let state = state();
        let body: Value =
            serde_json::from_str(&body_text(healthz(State(state.clone())).await).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["countries_loaded"], false);

        country_svg(State(state.clone()), Query(query(Some("FR"), None))).await;
        let body: Value =
            serde_json::from_str(&body_text(healthz(State(state)).await).await).unwrap();
        assert_eq!(body["countries_loaded"], true);
    }

    #[tokio::test]
    async fn data_failures_are_server_errors_and_retried() {
        let source = Arc::new(MemorySource::new());
        let state = state_with(source.clone(), Arc::new(GeoUnion));

        let resp = country_svg(State(state.clone()), Query(query(Some("FR"), None))).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        source.set_payload(WORLD).await;
        let resp = country_svg(State(state), Query(query(Some("FR"), None))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
