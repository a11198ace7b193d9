//! Minimal typed service container used by the `groundwork` bootstrap layer.
//!
//! Services are registered explicitly in a [ServiceCollection](collection::ServiceCollection)
//! as (type, lifetime, factory) entries and later resolved from an immutable
//! [ServiceProvider](provider::ServiceProvider) built from that collection. There is no
//! automatic discovery or autowiring - the collection is assembled by hand (usually through
//! the `groundwork` construction builder) during single-threaded application startup, and
//! the resulting provider is then safe to share between threads for read-only resolution.

pub mod collection;
pub mod error;
pub mod provider;
pub mod scope;
