//! CX Sentiment - Sentiment analysis for survey submissions.
//!
//! This crate turns free-text survey answers into a normalized sentiment
//! result, stores it on the submission and raises close-the-loop alerts for
//! strongly negative feedback. The `sentiment-backfill` binary runs the
//! pipeline over historical submissions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
