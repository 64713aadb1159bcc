use tower_lsp::lsp_types::Url;

/// Whether the document is a PHP file on disk
pub fn is_php_file(uri: &Url) -> bool {
    uri.scheme() == "file" && uri.path().to_lowercase().ends_with(".php")
}

/// 0-based line of a byte offset: the number of `\n` strictly before it
pub fn line_at_offset(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() as u32
}

/// Identifier characters accepted in class and method names
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
