pub mod summary;

#[cfg(feature = "paydown")]
pub mod paydown;
