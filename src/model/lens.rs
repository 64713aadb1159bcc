use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Position, Range};

/// 表示用のCodeLens（行 + タイトル）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLensItem {
    pub line: u32,
    pub title: String,
}

impl CodeLensItem {
    /// 行頭の幅0のRange
    pub fn to_lsp_range(&self) -> Range {
        let pos = Position {
            line: self.line,
            character: 0,
        };
        Range {
            start: pos,
            end: pos,
        }
    }
}
