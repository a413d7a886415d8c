pub mod manifest;
pub mod record;
pub mod result;
