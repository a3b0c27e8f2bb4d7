//! Integration tests against an in-process books service

mod api_tests;
mod common;
mod ui_tests;
