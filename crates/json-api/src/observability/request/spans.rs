//! HTTP span helpers.

use uuid::Uuid;

/// Probe and scrape endpoints that would drown out real traffic.
const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn is_unlogged_path(path: &str) -> bool {
    UNLOGGED_PATHS.contains(&path.trim_end_matches('/'))
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifiers with the route parameter they fill, so metric labels
/// stay bounded: `/cart/items/<uuid>` becomes `/cart/items/{line}`.
fn normalise_path_for_span_name(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut normalised = String::new();
    let mut previous = "";

    for segment in trimmed.split('/') {
        normalised.push('/');

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str(parameter_name(previous));
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

fn parameter_name(collection: &str) -> &'static str {
    match collection {
        "services" => "{service}",
        "items" => "{line}",
        "orders" => "{order}",
        _ => "{uuid}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_become_route_parameters() {
        let line = Uuid::now_v7();
        let order = Uuid::now_v7();

        assert_eq!(
            request_span_name("PATCH", &format!("/cart/items/{line}")).otel_span_name,
            "PATCH /cart/items/{line}"
        );
        assert_eq!(
            request_span_name("GET", &format!("/orders/{order}/")).otel_path,
            "/orders/{order}"
        );
        assert_eq!(
            request_span_name("GET", &format!("/widgets/{order}")).otel_path,
            "/widgets/{uuid}"
        );
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(request_span_name("GET", "/menu").otel_path, "/menu");
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
    }

    #[test]
    fn probes_are_not_logged() {
        assert!(is_unlogged_path("/metrics"));
        assert!(is_unlogged_path("/healthcheck/"));
        assert!(!is_unlogged_path("/orders"));
    }
}
