//! Transport tests

mod udp_tests;
