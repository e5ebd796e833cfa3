// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API request handlers.

pub mod auth;
pub mod health;
pub mod members;
pub mod resources;

pub use auth::{current_member, login, logout};
pub use health::health;
pub use members::{create_member, list_members, update_member, update_profile};
pub use resources::{
    create_attendance, create_feedback, create_form, create_vacation, list_attendance,
    list_feedback, list_forms, list_vacations, record_attendance, update_form,
};
