//! Post labeling pipeline.
//!
//! - **reader**: Read posts from JSON Lines
//! - **labeler**: Load resources from config and label one post
//! - **batch**: Label many posts concurrently

pub mod batch;
pub mod labeler;
pub mod reader;

pub use batch::{LabelResult, LabelingPipeline};
pub use labeler::PostLabeler;
pub use reader::{parse_posts, read_posts};
