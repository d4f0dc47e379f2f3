//! Callback handlers for the player window.
//!
//! This module contains all UI callback implementations organized by functionality:
//! - `loading` - Answer key + image loading with stale-result rejection
//! - `navigation` - Moving between activities (next/prev)
//! - `selection` - Hot zone toggling and submission
//! - `resize` - Viewport size tracking

pub mod loading;
pub mod navigation;
pub mod resize;
pub mod selection;
