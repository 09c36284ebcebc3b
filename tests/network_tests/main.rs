//! HTTP bridge tests

mod http_tests;
