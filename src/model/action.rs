use serde::{Deserialize, Serialize};

/// コントローラーのアクション（`FQCN@method`）と宣言行
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerAction {
    /// 例: `App\Http\Controllers\UserController@index`
    pub action: String,
    /// メソッド宣言の行（0始まり）
    pub line: u32,
}

impl ControllerAction {
    pub fn new(fqcn: &str, method: &str, line: u32) -> Self {
        Self {
            action: format!("{}@{}", fqcn, method),
            line,
        }
    }
}
