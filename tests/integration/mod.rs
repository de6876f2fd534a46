//! Integration tests for the Tender API
//!
//! These tests verify the behavior of the API endpoints with a real
//! (throwaway) database through the full router.

mod tender_tests;
