//! Unit tests for the SONM cloud provider
//!
//! These tests use recording fakes and run fast without external I/O.

mod marketplace;
