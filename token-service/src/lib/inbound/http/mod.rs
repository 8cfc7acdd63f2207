pub mod handlers;
pub mod router;
