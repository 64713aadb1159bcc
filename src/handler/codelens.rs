use std::sync::Arc;

use tower_lsp::lsp_types::*;

use crate::analyzer::scan_controller_actions;
use crate::model::{CodeLensItem, ControllerAction, RouteInfo, RouteTable};

/// アクションとルートを結合して表示用アイテムを作る（I/Oなし）
///
/// 1アクションに複数ルートがある場合は同じ行のアイテムをルート順に並べる。
/// ルートが無いアクションは何も出力しない。
pub fn build_lens_items<F, R>(actions: &[ControllerAction], mut lookup: F) -> Vec<CodeLensItem>
where
    F: FnMut(&str) -> R,
    R: AsRef<[RouteInfo]>,
{
    let mut items = Vec::new();

    for action in actions {
        let routes = lookup(&action.action);
        for route in routes.as_ref() {
            items.push(CodeLensItem {
                line: action.line,
                title: route.title(),
            });
        }
    }

    items
}

pub struct CodeLensHandler {
    routes: Arc<RouteTable>,
}

impl CodeLensHandler {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    /// PHPソースに対するCodeLens
    pub fn code_lens(&self, source: &str) -> Option<Vec<CodeLens>> {
        let actions = scan_controller_actions(source);
        if actions.is_empty() {
            return None;
        }

        let lenses: Vec<CodeLens> = build_lens_items(&actions, |action| self.routes.routes_for(action))
            .into_iter()
            .map(Self::create_route_lens)
            .collect();

        if lenses.is_empty() {
            None
        } else {
            Some(lenses)
        }
    }

    /// 表示のみのCodeLens（クリックしても何もしない）
    fn create_route_lens(item: CodeLensItem) -> CodeLens {
        CodeLens {
            range: item.to_lsp_range(),
            command: Some(Command {
                title: item.title,
                command: "".to_string(),
                arguments: None,
            }),
            data: None,
        }
    }
}
