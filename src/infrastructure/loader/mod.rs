mod web;

pub use web::{extract_page_text, parse_page_url, WebPageLoader};
