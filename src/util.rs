pub struct HtmlBuilder {
    title: String,
    body: String,
}

impl HtmlBuilder {
    pub fn new(title: &str, body: String) -> Self {
        Self {
            title: title.to_string(),
            body,
        }
    }

    /// 生成完整的 HTML 文档。骨架是固定的单行结构，保证同样的输入字节级一致。
    pub fn build(&self) -> String {
        format!(
            r#"<html><head><meta charset="utf-8"><title>{}</title></head><body>{}</body></html>"#,
            self.title, self.body
        )
    }
}

/// 对请求路径做百分号解码。
///
/// 只处理 `%XX` 转义：非法的转义序列原样保留，`+` 不会被替换为空格。
/// 解码结果不是合法 UTF-8 时整体回退为原始字符串。
pub fn decode_percent(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}
