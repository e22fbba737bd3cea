//! TetrECS (workspace facade crate).
//!
//! Re-exports the workspace crates under one `tetrecs::{types,core,engine}`
//! path while the implementation lives in dedicated crates under `crates/`.

pub use tetrecs_core as core;
pub use tetrecs_engine as engine;
pub use tetrecs_types as types;
