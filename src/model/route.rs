use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `route:list` の1ルート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub method: String,
    pub uri: String,
    pub name: Option<String>,
    pub action: String,
}

impl RouteInfo {
    /// CodeLensのタイトル: `GET users (users.index)`
    pub fn title(&self) -> String {
        let mut title = format!("{} {}", self.method.to_uppercase(), self.uri);
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            title.push_str(" (");
            title.push_str(name);
            title.push(')');
        }
        title
    }
}

/// アクション -> ルート一覧（出現順）
///
/// `Closure` や空のアクションは登録しない。キーが存在すれば必ず1件以上のルートを持つ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<String, Vec<RouteInfo>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, route: RouteInfo) {
        self.routes
            .entry(route.action.clone())
            .or_default()
            .push(route);
    }

    /// 指定アクションのルート（存在しなければ空）
    pub fn routes_for(&self, action: &str) -> &[RouteInfo] {
        self.routes.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, action: &str) -> bool {
        self.routes.contains_key(action)
    }

    /// ルートを持つアクションの数
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
