pub mod log;
pub mod setting;
pub mod user;

pub use log::{Log, LogFilter, LogQuery, LogStats, NewLog};
pub use setting::{SettingRow, Settings};
pub use user::{NewUser, Role, User, UserUpdate};
