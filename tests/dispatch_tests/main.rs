//! Dispatch tests
