pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod post_list;
pub mod post_processor;
pub mod server;
pub mod site;
pub mod text_utils;
pub mod theme;
pub mod view;
#[cfg(test)]
mod test_data;
