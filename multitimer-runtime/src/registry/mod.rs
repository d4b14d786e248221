mod builder;
mod registry;

pub use builder::RegistryBuilder;
pub use registry::TimerRegistry;

pub(crate) use registry::Shared;
