//! Split a scanned page into text lines or phrase blocks, pad and zoom each
//! region, and write the results as numbered image files.

pub mod config;
pub mod error;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod segment;
