//! Domain builders composed from the synthdata core
//!
//! This module provides:
//! - Network values (unique email addresses)
//! - Identity values (unique security numbers)
//! - Phone numbers from digit patterns
//! - Names and postal codes from a dictionary
//! - Date and timestamp windows
//! - Text over character alphabets

pub mod datetime;
pub mod identity;
pub mod names;
pub mod network;
pub mod phone;
pub mod text;
