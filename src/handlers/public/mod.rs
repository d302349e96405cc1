pub mod login;
pub mod setup;

pub use login::post as login_post;
pub use setup::get as setup_get;
