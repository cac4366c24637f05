//! RosbagPanel - recording control panel for a bag recording service
//!
//! This crate provides a control panel that drives an external recorder
//! through a visualization host: it edits the recorder's bag name, output
//! directory and topic selection, starts and stops recordings, shows live
//! duration and size, and keeps a list of recordings saved this session.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Panel state, its reducer and view model, value objects, and errors
//! - **Application**: The recording panel use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (TOML config store, simulated host)
//! - **CLI**: Command-line interface, interactive session, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
