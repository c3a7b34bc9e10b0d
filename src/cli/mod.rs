//! CLI infrastructure for the qlearn toolkit
//!
//! This module provides the command-line interface for training tabular
//! Q-learning agents on the bundled environments and evaluating the
//! resulting policies.

pub mod commands;
