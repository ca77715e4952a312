//! OpenGL backend for the devgl demos.
//!
//! This crate is a thin, safe-ish layer over the raw [gl](https://crates.io/crates/gl) bindings.
//! It owns the GPU objects the demos need (shader stages and programs, uniforms, vertex buffers
//! and vertex arrays) and releases them when dropped. It is not a rendering engine: every call
//! maps to one or two OpenGL calls, with a small cache to avoid redundant state changes.

pub mod gl33;

pub use gl33::GL33;
