//! civicprep-core: study engine for the U.S. naturalization civics test.
//!
//! This crate loads localized question collections, selects trial, full and
//! balanced test sets, pages through collections, and scores answer maps. It
//! also carries the supporting study content: quiz attempts, flashcard
//! review, grammar practice and the glossary.

pub mod attempt;
pub mod config;
pub mod error;
pub mod glossary;
pub mod grammar;
pub mod loader;
pub mod model;
pub mod report;
pub mod review;
pub mod scoring;
pub mod selection;

#[cfg(test)]
mod test_support;
