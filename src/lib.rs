//! MCDA Engine - Multi-criteria decision analysis core
//!
//! This crate validates pairwise comparison matrices, derives AHP priority
//! vectors with consistency ratios, scores alternatives with Simple Additive
//! Weighting, and produces deterministic final rankings.

pub mod application;
pub mod config;
pub mod domain;

pub use domain::analysis::{derive_priorities, rank, score_saw, validate_matrix};
