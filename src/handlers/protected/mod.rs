pub mod dispatch;
pub mod logs;
pub mod proxy;
pub mod settings;
pub mod templates;
pub mod users;
pub mod whatsapp;

pub use dispatch::{dispatch as dispatch_post, preview as preview_post};
pub use logs::{get as logs_get, post as logs_post, stats as logs_stats};
pub use proxy::post as proxy_post;
pub use settings::{get as settings_get, put as settings_put};
pub use templates::get as templates_get;
pub use users::{delete as user_delete, get as users_get, post as users_post, put as user_put};
pub use whatsapp::status as whatsapp_status;
