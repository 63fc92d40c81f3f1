//! Integration tests for the scraper
//!
//! These use wiremock to stand in for the target site and exercise the
//! full discover → count → fetch → parse → aggregate → persist cycle.

mod sweep_tests;
