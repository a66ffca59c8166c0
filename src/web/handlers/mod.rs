// HTTP handlers, one module per route.

pub mod download;
pub mod reset;
pub mod similarity;

use serde::Deserialize;

/// `?session=<id>` query parameter shared by download and reset.
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session: Option<String>,
}
