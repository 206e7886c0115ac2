use crate::param::*;

use bytes::Bytes;
use log::error;

use std::path::Path;

/// 即将写回客户端的完整响应。
///
/// 三类出口共用该结构：文件下载（200）、搜索结果页（200）和方法拒绝（405）。
/// 405 响应不携带任何头字段，`as_bytes` 只会输出状态行和终止空行。
#[derive(Debug, Clone)]
pub struct Response {
    version: HttpVersion,
    status_code: u16,
    information: String,
    content_type: Option<String>,
    content_length: u64,
    content_disposition: Option<String>,
    content: Option<Bytes>,
}

impl Response {
    pub fn new() -> Self {
        Self {
            version: HttpVersion::V1_1,
            status_code: 200,
            information: "OK".to_string(),
            content_type: None,
            content_length: 0,
            content_disposition: None,
            content: None,
        }
    }

    /// 由文件名与文件内容构建下载响应。
    ///
    /// `Content-Type` 按扩展名查表，`Content-Disposition` 标记为附件下载。
    pub fn from_file(file_name: &str, content: Bytes) -> Self {
        let mime = get_mime(file_name);
        let mut response = Self::new();
        response.content_type = Some(mime.to_string());
        response.content_length = content.len() as u64;
        response.content_disposition = Some(format!("attachment; filename=\"{}\"", file_name));
        response.content = Some(content);
        response
    }

    /// 由渲染完成的搜索结果页构建响应。
    pub fn from_search(html: String) -> Self {
        let mut response = Self::new();
        response.content_type = Some("text/html; charset=utf-8".to_string());
        response.content_length = html.len() as u64;
        response.content = Some(Bytes::from(html));
        response
    }

    /// 方法拒绝响应，只有状态行。
    pub fn method_not_allowed() -> Self {
        let mut response = Self::new();
        response.set_code(405);
        response
    }

    fn set_code(&mut self, code: u16) -> &mut Self {
        self.status_code = code;
        self.information = match STATUS_CODES.get(&code) {
            Some(&information) => information.to_string(),
            None => {
                error!("非法的状态码：{}。这条错误说明代码编写出现了错误。", code);
                panic!();
            }
        };
        self
    }

    /// 序列化为可直接写入 Socket 的字节序列。
    ///
    /// 头字段的有无和顺序是协议约定的一部分，同样的输入必须产出同样的字节，
    /// 因为该序列会被整体放入响应缓存。
    pub fn as_bytes(&self) -> Vec<u8> {
        let version: &str = match self.version {
            HttpVersion::V1_1 => "HTTP/1.1",
        };
        let status_code: &str = &self.status_code.to_string();
        let information: &str = &self.information;
        let content_length: &str = &self.content_length.to_string();

        let header = [
            version,
            " ",
            status_code,
            " ",
            information,
            CRLF,
            match &self.content_type {
                Some(t) => ["Content-Type: ", t, CRLF].concat(),
                None => "".to_string(),
            }
            .as_str(),
            match &self.content {
                Some(_) => ["Content-Length: ", content_length, CRLF].concat(),
                None => "".to_string(),
            }
            .as_str(),
            match &self.content_disposition {
                Some(d) => ["Content-Disposition: ", d, CRLF].concat(),
                None => "".to_string(),
            }
            .as_str(),
            CRLF,
        ]
        .concat();
        [
            header.as_bytes(),
            match &self.content {
                Some(c) => &c,
                None => b"",
            },
        ]
        .concat()
    }
}

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn information(&self) -> &str {
        &self.information
    }
}

fn get_mime(file_name: &str) -> &'static str {
    let extension = match Path::new(file_name).extension() {
        Some(e) => match e.to_str() {
            Some(e) => e.to_lowercase(),
            None => {
                error!("无法将&OsStr转换为&str类型");
                return "application/octet-stream";
            }
        },
        None => return "application/octet-stream",
    };
    match MIME_TYPES.get(extension.as_str()) {
        Some(v) => v,
        None => "application/octet-stream",
    }
}
