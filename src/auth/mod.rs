// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Bearer-token authentication.
//!
//! Handlers opt in to authentication through extractors: [`Auth`] for
//! endpoints that require a logged-in user and [`AdminOnly`] for the admin
//! surface.

mod claims;
mod error;
mod extractor;
mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use token::{decode_token, issue_token};
