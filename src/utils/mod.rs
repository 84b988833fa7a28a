//! Utility modules for the site renderer.

pub mod fs;
pub mod hash;
pub mod html;
pub mod mime;
pub mod plural;
