// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod services;
