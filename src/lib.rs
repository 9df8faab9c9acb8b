//! Quiz Funnel - Weight-loss questionnaire with body-metric estimates
//!
//! A step-gated quiz collects the visitor's answers, enriches them with
//! BMI, BMR, TDEE and a weight-loss plan, then walks a fixed sequence of
//! results screens before handing off to an external checkout.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
