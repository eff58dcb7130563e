/// Tag-driven copy command.
pub mod copy;
/// Registry inspection command.
pub mod schema;

#[cfg(test)]
mod test_support;
pub(crate) mod util;
