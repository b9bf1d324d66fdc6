#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod db;

pub mod api;

pub mod backend;

pub mod catalog;

pub mod submission;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod telemetry;

#[cfg(feature = "server")]
pub mod auth;

#[cfg(feature = "server")]
pub mod storage;

#[cfg(feature = "server")]
pub mod repo;

#[cfg(feature = "server")]
pub mod write_guard;
