#![no_std]
pub mod globals;
pub mod keycodes;
pub mod wire;
