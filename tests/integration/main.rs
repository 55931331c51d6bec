//! Integration tests for site-extractor
//!
//! These tests run against wiremock servers on 127.0.0.1 and exercise the
//! crawl, probe, service and HTTP layers end-to-end.

mod crawl_tests;
mod probe_tests;
mod service_tests;
