//! Procrastination scoring for self-reported teen phone habits.
//!
//! The [`prediction`] module turns a questionnaire submission into the feature
//! vector a pre-trained forest expects, scores it and interprets the score into
//! a risk tier, recommendations and risk factors.

pub mod config;
pub mod error;
pub mod prediction;
pub mod telemetry;
