//! Application bootstrapping based on [groundwork_di] dependency injection.
//!
//! Applications typically wire the same infrastructure at startup: load layered
//! configuration, set up logging, register services, then resolve them for the rest of the
//! process. This crate packages that wiring behind a fluent
//! [FrameworkConstruction](construction::FrameworkConstruction) builder: the
//! [configuration assembler](config) merges environment variables and optional
//! `appsettings.json` files into one snapshot, the [default registrar](logger) installs a
//! daily-rolling file logger, and building the construction finalizes the registrations
//! into a resolvable provider. The [Framework](framework::Framework) facade then exposes
//! that provider process-wide, while [host](host) bridges the same lifecycle into an
//! externally-owned hosting pipeline.
//!
//! ```no_run
//! use groundwork::construction::FrameworkConstruction;
//! use groundwork::framework::Framework;
//!
//! # fn main() -> Result<(), groundwork::error::FrameworkError> {
//! Framework::construct(FrameworkConstruction::with_defaults()?);
//! Framework::build()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod construction;
pub mod environment;
pub mod error;
pub mod framework;
pub mod host;
pub mod logger;
