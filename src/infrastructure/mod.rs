//! Infrastructure layer - loading API descriptions from files and URLs

pub mod openapi;
