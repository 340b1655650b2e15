//! ScienceDaily illustrator - turns science news into social-media illustrations
//!
//! Scrapes the latest articles of a ScienceDaily category, asks a chat model for
//! a short visual content idea per article, renders that idea with an image
//! model, and exports the results as CSV.

pub mod ai;
pub mod app;
pub mod error;
pub mod export;
pub mod listing;
pub mod models;
pub mod presenter;
pub mod prompts;

pub use error::{Error, Result};
