//! # Enroll - Passwordless-Bootstrap Registration Service Library
//!
//! This is a facade crate that re-exports all public APIs from the enroll service components.
//! Use this crate to get access to the whole registration/login flow in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! enroll = { path = "../enroll" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `UniqueId`, `Email`, `Password`, `OtpCode`, `IdentityRecord`, etc.
//! - **Port traits**: `IdentityStore`, `EmailClient`, `PasswordHasher`, `TokenSigner`
//! - **Use cases**: `CheckUserUseCase`, `SendOtpUseCase`, `VerifyOtpUseCase`,
//!   `SetPasswordUseCase`, `LoginUseCase`
//! - **Adapters**: `PostgresIdentityStore`, `BrevoEmailClient`, `Argon2PasswordHasher`,
//!   `JwtTokenSigner`, etc.
//! - **Service**: `EnrollService` - The main entry point for the registration service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enroll_core::*;
}

// Re-export most commonly used core types at the root level
pub use enroll_core::{
    Email, EmailError, IdentityRecord, OtpCode, OtpCodeError, OtpVerifyError, Password,
    PasswordDigest, PasswordError, UniqueId, UniqueIdError,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use enroll_core::{
        ColumnInfo, EmailClient, IdentityStore, IdentityStoreError, IdentitySummary,
        PasswordHasher, PasswordPolicy, SessionClaims, StoreDiagnostics, TokenSigner,
    };
}

// Re-export port traits at root level
pub use enroll_core::{
    EmailClient, IdentityStore, IdentityStoreError, PasswordHasher, PasswordPolicy,
    SessionClaims, TokenSigner,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use enroll_application::*;
}

// Re-export use cases at root level
pub use enroll_application::{
    CheckUserUseCase, LoginUseCase, SendOtpUseCase, SetPasswordUseCase, VerifyOtpUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use enroll_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use enroll_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use enroll_adapters::email::*;
    }

    /// Hashing and token-signing utilities
    pub mod auth {
        pub use enroll_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use enroll_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use enroll_adapters::{
    auth::{Argon2PasswordHasher, JwtTokenSigner},
    email::{BrevoEmailClient, MockEmailClient, UnconfiguredEmailClient},
    persistence::{InMemoryIdentityStore, PostgresIdentityStore},
};

// ============================================================================
// Enroll Service (Main Entry Point)
// ============================================================================

/// Main registration service
pub use enroll_service::{EnrollService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
