#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod core;
mod prelude;
pub mod quantity;
pub mod scenario;
pub mod tables;

pub use crate::{
    core::{
        action::BerthAction,
        diagnosis::{
            Bottleneck,
            Contradiction,
            DiagnosticReport,
            EnergyBudget,
            FrontierOverflow,
            Suggestion,
        },
        outcome::Outcome,
        plan::{Plan, PlanStep},
        pricing::CostBreakdown,
        solver::{Limits, Solver},
    },
    scenario::{
        Scenario,
        error::ConfigError,
        pricing::PricingTerms,
        station::{CurrentSign, Service, Station},
    },
};
