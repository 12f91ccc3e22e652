#![cfg(test)]

pub mod common;
pub mod designer_tests;
pub mod lifecycle_tests;
