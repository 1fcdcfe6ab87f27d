pub mod pool;
pub mod session;

pub use pool::connect_options;
pub use session::SessionManager;
