use std::path::Path;

/// `artisan` があればLaravelプロジェクトとみなす
pub fn is_laravel_project(dir: &Path) -> bool {
    has_artisan_script(dir, "artisan")
}

/// 設定されたartisanスクリプト（`dir` からの相対パス可）が存在するか
pub fn has_artisan_script(dir: &Path, artisan: &str) -> bool {
    dir.join(artisan).exists()
}
