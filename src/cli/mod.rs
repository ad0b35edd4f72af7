//! Command implementations.
//!
//! | Command  | Entry point                 |
//! |----------|-----------------------------|
//! | `render` | [`render::render`]          |
//! | `build`  | [`build::build_site`]       |
//! | `blocks` | [`blocks::list_blocks`]     |

pub mod args;
pub mod blocks;
pub mod build;
pub mod render;

pub use args::{BuildArgs, Cli, Commands, RenderArgs};
