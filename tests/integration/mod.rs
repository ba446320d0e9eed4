//! Integration tests for Switchboard API endpoints

mod health;
mod models;
