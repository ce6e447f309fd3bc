//! Ad copy generation for adsmith.
//!
//! Three pieces, used in sequence by the pipeline: prompt templates around a
//! fixed persuasion formula ([`prompt`]), a bounded-timeout client for the
//! external generation API ([`client`]), and a total parser that turns the
//! raw response into a headline and ad copy with layered fallbacks
//! ([`parse`]).

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

pub use client::CopyClient;
pub use error::CopyError;
pub use parse::{parse_generated, AdText, DEFAULT_AD_COPY, DEFAULT_HEADLINE};
pub use prompt::{manual_prompt, scraped_prompt, ManualAdFields};
