pub mod cache;
pub mod config;
pub mod dispatch;
pub mod exception;
pub mod param;
pub mod request;
pub mod response;
pub mod search;
pub mod server;
pub mod util;

pub use cache::ResponseCache;
pub use config::Config;
pub use dispatch::Dispatcher;
pub use exception::Exception;
pub use param::HttpVersion;
pub use request::Request;
pub use response::Response;
pub use server::Server;
pub use util::HtmlBuilder;
