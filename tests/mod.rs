//! Test module organization.
//!
//! This module organizes all integration tests for the cache simulator.




/// End-to-end trace replay tests.
mod integration_tests;


/// Access simulator tests.
mod simulator_tests;
