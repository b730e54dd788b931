pub mod html_utils;
pub mod url_utils;

pub use html_utils::escape_html;
pub use url_utils::validate_url;
