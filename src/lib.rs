//! Maktab - School records backend
//!
//! This library provides the core functionality of the school backend:
//! teachers, students, the class schedule and login with role-based tokens.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
