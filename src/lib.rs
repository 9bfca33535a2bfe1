//! Front end for a résumé extraction service.
//!
//! A PDF is picked (file picker or drop zone), uploaded to
//! `POST {origin}/extract/pdf` and the returned fields are rendered as
//! cards plus pretty-printed JSON. [`core::UploadPanel`] holds the page
//! state; the web front end ([`web`]) and the command line ([`cli`]) drive it.

mod macros;

pub mod cli;
pub mod core;
pub mod types;
pub mod utils;
pub mod web;
