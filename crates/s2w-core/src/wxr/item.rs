//! One WXR `<item>`: the rendered field values for a post.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::dates::PostDates;

/// Bytes left as-is in `wp:post_name`; everything else is `%XX`-encoded.
const POST_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Percent-encodes a post id for `wp:post_name`.
pub fn post_name(post_id: &str) -> String {
    utf8_percent_encode(post_id, POST_NAME_SET).to_string()
}

/// Everything that varies per item. Constant fields (`comment_status`,
/// `post_type`, ...) live in the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WxrItem {
    pub title: String,
    pub link: String,
    pub creator: String,
    pub guid: String,
    pub content: String,
    pub pub_date: String,
    pub post_date: String,
    pub post_date_gmt: String,
    pub post_name: String,
}

impl WxrItem {
    pub fn new(post_id: &str, title: &str, link: String, content: String, dates: &PostDates) -> Self {
        Self {
            title: title.to_string(),
            link,
            creator: String::new(),
            guid: post_id.to_string(),
            content,
            pub_date: dates.pub_date(),
            post_date: dates.wp_local(),
            post_date_gmt: dates.wp_gmt(),
            post_name: post_name(post_id),
        }
    }
}
