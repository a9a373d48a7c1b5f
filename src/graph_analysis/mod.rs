/// Graph analysis core - domain model and pure services
///
/// Nothing in this layer performs I/O. Services run single-threaded over an
/// explicitly passed [`domain::DependencyGraph`].
pub mod domain;
pub mod services;
