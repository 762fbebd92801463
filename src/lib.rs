pub mod assembler;
pub mod blueprint;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod create;
pub mod deploy;
pub mod doctor;
pub mod error;
pub mod gcloud;
pub mod generator;
pub mod model;
pub mod patterns;
pub mod profiles;
pub mod prompt;
pub mod theme;
pub mod writer;
