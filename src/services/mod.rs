//! Services layer - Business logic
//!
//! This module contains the business logic of the school backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories, hashing and token signing
//! - Handling validation and error cases

pub mod auth;
pub mod password;
pub mod records;
pub mod stats;
pub mod token;

pub use auth::{AuthError, AuthService, DemoAccount, LoginInput, LoginSession, RegisterInput, DEMO_ACCOUNTS};
pub use password::{hash_password, verify_password};
pub use records::{RecordError, RecordKind, RecordService};
pub use stats::StatsService;
pub use token::{Claims, TokenError, TokenService};
