pub mod cache;
pub mod controller;
pub mod pdf_loader;
pub mod session;
pub mod tab;

#[cfg(test)]
pub(crate) mod test_support;
