//! PHPコントローラーソースからアクション（`FQCN@method`）を抽出
//!
//! 汎用パーサーではなく、`namespace` / `class` / `public function` の3パターンのみを
//! 生テキストに対して照合する。
//!
//! 制限: 1ファイルに複数クラスがある場合、全メソッドが最初に見つかったクラスに紐づく。
//! また `namespace` / `class` / `public` は直前が識別子文字（または `$`）でない場合のみ
//! キーワードとみなすため、`subclass Foo` のような語中の出現は一致しない。
//!
//! 空白は `char::is_whitespace`（垂直タブやノーブレークスペースを含む）で判定する。

use crate::model::ControllerAction;
use crate::util::{is_ident_byte, line_at_offset};

const NAMESPACE: &str = "namespace";
const CLASS: &str = "class";
const PUBLIC: &str = "public";
const FUNCTION: &str = "function";

/// ソースからpublicメソッドのアクション一覧を取得（出現順）
///
/// クラス宣言が無ければ常に空。
pub fn scan_controller_actions(source: &str) -> Vec<ControllerAction> {
    let Some(class_name) = find_class_name(source) else {
        return Vec::new();
    };
    let fqcn = match find_namespace(source) {
        Some(namespace) => format!("{}\\{}", namespace, class_name),
        None => class_name.to_string(),
    };

    let mut actions = Vec::new();
    let mut line = 0u32;
    let mut counted_to = 0usize;

    for (offset, method) in public_methods(source) {
        line += line_at_offset(&source[counted_to..], offset - counted_to);
        counted_to = offset;
        actions.push(ControllerAction::new(&fqcn, method, line));
    }

    actions
}

/// 最初の `namespace <path>;` のパス（trim済み）
fn find_namespace(source: &str) -> Option<&str> {
    for start in keyword_positions(source, NAMESPACE) {
        let after = start + NAMESPACE.len();
        let Some(ws) = source[after..].chars().next().filter(|c| c.is_whitespace()) else {
            continue;
        };
        let semi = after + source[after..].find(';')?;
        // 空白1文字 + パス1文字以上
        if after + ws.len_utf8() >= semi {
            continue;
        }
        let path = source[after..semi].trim();
        return (!path.is_empty()).then_some(path);
    }
    None
}

/// 最初の `class <Identifier>` のクラス名
fn find_class_name(source: &str) -> Option<&str> {
    let bytes = source.as_bytes();
    for start in keyword_positions(source, CLASS) {
        let after = start + CLASS.len();
        let name_start = skip_whitespace(source, after);
        if name_start == after {
            continue;
        }
        let name_end = skip_ident(bytes, name_start);
        if name_end > name_start {
            return Some(&source[name_start..name_end]);
        }
    }
    None
}

/// `public function <name> (` の (開始オフセット, メソッド名)
fn public_methods(source: &str) -> Vec<(usize, &str)> {
    let bytes = source.as_bytes();
    let mut methods = Vec::new();

    for start in keyword_positions(source, PUBLIC) {
        let after = start + PUBLIC.len();
        let function_start = skip_whitespace(source, after);
        if function_start == after || !source[function_start..].starts_with(FUNCTION) {
            continue;
        }

        let after_function = function_start + FUNCTION.len();
        let name_start = skip_whitespace(source, after_function);
        if name_start == after_function {
            continue;
        }

        let name_end = skip_ident(bytes, name_start);
        if name_end == name_start {
            continue;
        }

        let paren = skip_whitespace(source, name_end);
        if bytes.get(paren) != Some(&b'(') {
            continue;
        }

        methods.push((start, &source[name_start..name_end]));
    }

    methods
}

/// 識別子の一部ではない `keyword` の出現位置
fn keyword_positions<'a>(source: &'a str, keyword: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = source.as_bytes();
    source
        .match_indices(keyword)
        .map(|(i, _)| i)
        .filter(move |&i| i == 0 || !(is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b'$'))
}

fn skip_whitespace(source: &str, pos: usize) -> usize {
    source[pos..]
        .find(|c: char| !c.is_whitespace())
        .map_or(source.len(), |i| pos + i)
}

fn skip_ident(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_ident_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}
