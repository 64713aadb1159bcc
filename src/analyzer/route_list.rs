//! `php artisan route:list --json` の出力をアクション別のルート表に変換
//!
//! 不正な入力に対しては常に空（または部分的）な表を返し、エラーにはしない。

use serde::Deserialize;
use serde_json::Value;

use crate::model::{RouteInfo, RouteTable};

const CLOSURE_ACTION: &str = "Closure";
const DEFAULT_METHOD: &str = "GET";

/// ルート一覧の1要素（全フィールド任意、型が違う値は未指定扱い）
#[derive(Debug, Deserialize)]
struct RawRouteRow {
    #[serde(default)]
    action: Option<Value>,
    #[serde(default)]
    action_name: Option<Value>,
    #[serde(default)]
    methods: Option<Value>,
    #[serde(default)]
    method: Option<Value>,
    #[serde(default)]
    uri: Option<Value>,
    #[serde(default)]
    path: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    route_name: Option<Value>,
}

/// JSON文字列をパースしてルート表を返す
pub fn parse_route_list(json: &str) -> RouteTable {
    let mut table = RouteTable::new();

    let rows = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(rows)) => rows,
        Ok(_) => {
            tracing::debug!("route:list output is not an array");
            return table;
        }
        Err(e) => {
            tracing::debug!("Failed to parse route:list output: {}", e);
            return table;
        }
    };

    for row in rows {
        if !row.is_object() {
            continue;
        }
        let Ok(row) = serde_json::from_value::<RawRouteRow>(row) else {
            continue;
        };
        if let Some(route) = resolve_route(&row) {
            table.insert(route);
        }
    }

    table
}

fn resolve_route(row: &RawRouteRow) -> Option<RouteInfo> {
    let action = resolve_action(row)?;
    Some(RouteInfo {
        method: resolve_method(row).to_string(),
        uri: resolve_uri(row).to_string(),
        name: resolve_name(row).map(str::to_string),
        action: action.to_string(),
    })
}

/// 文字列値のみを取り出す（null・他の型は未指定）
fn as_str(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// `action` -> `action_name`。空文字列と `Closure` は対象外
fn resolve_action(row: &RawRouteRow) -> Option<&str> {
    let action = as_str(&row.action).or_else(|| as_str(&row.action_name))?;
    if action.is_empty() || action == CLOSURE_ACTION {
        return None;
    }
    Some(action)
}

/// `methods[0]` -> `method` -> `GET`
fn resolve_method(row: &RawRouteRow) -> &str {
    let first_of_methods = row
        .methods
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|methods| methods.first())
        .and_then(Value::as_str);

    first_of_methods
        .or_else(|| as_str(&row.method))
        .unwrap_or(DEFAULT_METHOD)
}

/// `uri` -> `path` -> 空文字列
fn resolve_uri(row: &RawRouteRow) -> &str {
    as_str(&row.uri).or_else(|| as_str(&row.path)).unwrap_or("")
}

/// `name` -> `route_name`
fn resolve_name(row: &RawRouteRow) -> Option<&str> {
    as_str(&row.name).or_else(|| as_str(&row.route_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = r#"[
        {
            "method": "GET",
            "uri": "users",
            "name": "users.index",
            "action": "App\\Http\\Controllers\\UserController@index"
        },
        {
            "methods": ["GET", "HEAD"],
            "uri": "users/create",
            "name": "users.create",
            "action": "App\\Http\\Controllers\\UserController@create"
        },
        {
            "method": "POST",
            "uri": "users",
            "name": "users.store",
            "action": "App\\Http\\Controllers\\UserController@store"
        },
        {
            "uri": "closure",
            "action": "Closure"
        },
        {
            "method": "GET",
            "uri": "dashboard",
            "action": ""
        }
    ]"#;

    fn row(json: &str) -> RawRouteRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_routes_keyed_by_action() {
        let table = parse_route_list(SAMPLE);

        assert_eq!(table.len(), 3);

        let index = &table.routes_for("App\\Http\\Controllers\\UserController@index")[0];
        assert_eq!(index.method, "GET");
        assert_eq!(index.uri, "users");
        assert_eq!(index.name.as_deref(), Some("users.index"));

        let create = &table.routes_for("App\\Http\\Controllers\\UserController@create")[0];
        assert_eq!(create.method, "GET");
        assert_eq!(create.uri, "users/create");

        let store = &table.routes_for("App\\Http\\Controllers\\UserController@store")[0];
        assert_eq!(store.method, "POST");
        assert_eq!(store.name.as_deref(), Some("users.store"));
    }

    #[test]
    fn test_skips_closure_and_empty_actions() {
        let table = parse_route_list(SAMPLE);
        assert!(!table.contains("Closure"));
        assert!(!table.contains(""));
    }

    #[rstest]
    #[case("not json at all")]
    #[case("")]
    #[case("{ invalid }")]
    #[case(r#"{"foo": "bar"}"#)]
    #[case("42")]
    #[case("null")]
    fn test_malformed_input_yields_empty_table(#[case] json: &str) {
        assert!(parse_route_list(json).is_empty());
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let json = r#"[
            1,
            null,
            ["App\\A@index", "GET"],
            {"action": "App\\B@index", "uri": "b"}
        ]"#;
        let table = parse_route_list(json);
        assert_eq!(table.len(), 1);
        assert!(table.contains("App\\B@index"));
    }

    #[test]
    fn test_alternate_field_names() {
        let json = r#"[{
            "method": "GET",
            "path": "api/ping",
            "route_name": "api.ping",
            "action_name": "App\\Http\\Controllers\\ApiController@ping"
        }]"#;
        let table = parse_route_list(json);
        let route = &table.routes_for("App\\Http\\Controllers\\ApiController@ping")[0];
        assert_eq!(route.uri, "api/ping");
        assert_eq!(route.name.as_deref(), Some("api.ping"));
    }

    #[test]
    fn test_null_action_falls_back_to_action_name() {
        let json = r#"[{
            "action": null,
            "action_name": "App\\Http\\Controllers\\FallbackController@show",
            "uri": "fallback",
            "method": "GET"
        }]"#;
        let table = parse_route_list(json);
        let routes = table.routes_for("App\\Http\\Controllers\\FallbackController@show");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].uri, "fallback");
    }

    #[test]
    fn test_skips_rows_without_action() {
        let json = r#"[
            {"action": "App\\Http\\Controllers\\A@index", "method": "GET", "uri": "a"},
            {"method": "GET", "uri": "no-action"},
            {"action": "App\\Http\\Controllers\\B@index", "method": "GET", "uri": "b"}
        ]"#;
        let table = parse_route_list(json);
        assert_eq!(table.len(), 2);
        assert!(table.contains("App\\Http\\Controllers\\A@index"));
        assert!(table.contains("App\\Http\\Controllers\\B@index"));
    }

    #[test]
    fn test_shared_action_keeps_arrival_order() {
        let json = r#"[
            {"action": "App\\ItemController@show", "method": "GET", "uri": "items/{id}", "name": "items.show"},
            {"action": "App\\OtherController@index", "uri": "other"},
            {"action": "App\\ItemController@show", "method": "PUT", "uri": "items/{id}", "name": "items.update"}
        ]"#;
        let table = parse_route_list(json);
        let routes = table.routes_for("App\\ItemController@show");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method, "GET");
        assert_eq!(routes[1].method, "PUT");
        assert_eq!(routes[1].name.as_deref(), Some("items.update"));
    }

    #[test]
    fn test_same_input_same_table() {
        assert_eq!(parse_route_list(SAMPLE), parse_route_list(SAMPLE));
    }

    #[rstest]
    #[case(r#"{"methods": ["GET", "HEAD"]}"#, "GET")]
    #[case(r#"{"methods": ["POST"], "method": "PUT"}"#, "POST")]
    #[case(r#"{"methods": [], "method": "DELETE"}"#, "DELETE")]
    #[case(r#"{"method": "patch"}"#, "patch")]
    #[case(r#"{"method": null}"#, "GET")]
    #[case(r#"{}"#, "GET")]
    fn test_resolve_method(#[case] json: &str, #[case] expected: &str) {
        assert_eq!(resolve_method(&row(json)), expected);
    }

    #[rstest]
    #[case(r#"{"uri": "users", "path": "ignored"}"#, "users")]
    #[case(r#"{"path": "api/ping"}"#, "api/ping")]
    #[case(r#"{}"#, "")]
    fn test_resolve_uri(#[case] json: &str, #[case] expected: &str) {
        assert_eq!(resolve_uri(&row(json)), expected);
    }

    #[rstest]
    #[case(r#"{"name": "users.index"}"#, Some("users.index"))]
    #[case(r#"{"name": null, "route_name": "legacy"}"#, Some("legacy"))]
    #[case(r#"{"route_name": "legacy"}"#, Some("legacy"))]
    #[case(r#"{"name": null}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_resolve_name(#[case] json: &str, #[case] expected: Option<&str>) {
        assert_eq!(resolve_name(&row(json)), expected);
    }

    #[rstest]
    #[case(r#"{"action": "A@index"}"#, Some("A@index"))]
    #[case(r#"{"action_name": "A@index"}"#, Some("A@index"))]
    #[case(r#"{"action": "", "action_name": "A@index"}"#, None)]
    #[case(r#"{"action": "Closure"}"#, None)]
    #[case(r#"{"action": null, "action_name": "Closure"}"#, None)]
    #[case(r#"{}"#, None)]
    fn test_resolve_action(#[case] json: &str, #[case] expected: Option<&str>) {
        assert_eq!(resolve_action(&row(json)), expected);
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let json = r#"[{"action": "App\\NoUriController@index"}]"#;
        let table = parse_route_list(json);
        let route = &table.routes_for("App\\NoUriController@index")[0];
        assert_eq!(route.method, "GET");
        assert_eq!(route.uri, "");
        assert_eq!(route.name, None);
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_to_defaults() {
        let json = r#"[{"action": "App\\OddController@index", "uri": 5, "methods": "GET", "name": false}]"#;
        let table = parse_route_list(json);
        let route = &table.routes_for("App\\OddController@index")[0];
        assert_eq!(route.method, "GET");
        assert_eq!(route.uri, "");
        assert_eq!(route.name, None);
    }
}
