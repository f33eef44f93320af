//! Core business logic for Meridian.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `comparison` - Budget comparisons: items, company prices, category roll-ups
//! - `forecast` - Monthly revenue/cost/salary/overhead projections
//! - `money` - Accepted range of money amounts

pub mod comparison;
pub mod forecast;
pub mod money;
