//! Name resolution: occurrence to declaration, and overload selection.
mod name_resolver;
mod overloads;

pub use name_resolver::NameResolver;
pub use overloads::OverloadSet;

#[cfg(test)]
mod tests;
