pub mod constants;
pub mod markdown;
#[cfg(test)]
pub mod test_helpers;
pub mod text;
pub mod types;
pub mod validation;
