//! # 文件名搜索模块
//!
//! 没有文件与请求路径对应时的回退出口：按关键词在内容根目录下
//! 做文件名子串匹配，并把结果渲染为下载链接页面。

use log::debug;
use tokio::fs;

use crate::exception::Exception;
use crate::util::HtmlBuilder;

/// 搜索结果页的标题
const RESULT_TITLE: &str = "搜索结果";

/// 没有任何匹配时页面正文的固定文案
const NO_MATCH_NOTE: &str = "<p>没有找到与搜索关键词匹配的文件。</p>";

/// 遍历根目录下的常规文件，返回文件名包含关键词的条目。
///
/// 匹配不区分大小写；目录与其他非常规文件一律不参与匹配。
/// 结果顺序与目录遍历顺序一致，不做排序。空关键词匹配所有文件。
pub async fn find_matches(root: &str, search_key: &str, id: u128) -> Result<Vec<String>, Exception> {
    let key_lower = search_key.to_lowercase();
    let mut matches = Vec::new();

    let mut entries = fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if !file_type.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.to_lowercase().contains(&key_lower) {
            matches.push(file_name);
        }
    }

    debug!("[ID{}]关键词\"{}\"匹配到{}个文件", id, search_key, matches.len());
    Ok(matches)
}

/// 把搜索结果渲染为 HTML 页面。
///
/// 每个匹配项是一个指向 `/<文件名>` 的下载链接，文件名原样写入，不做转义。
pub fn render_results(matches: &[String]) -> String {
    let mut body = String::new();
    if matches.is_empty() {
        body.push_str(NO_MATCH_NOTE);
    } else {
        for file_name in matches {
            body.push_str(&format!(
                "<a href=\"/{}\">{}</a><br/>\n",
                file_name, file_name
            ));
        }
    }
    HtmlBuilder::new(RESULT_TITLE, body).build()
}
