pub mod check_user;
pub mod db_status;
pub mod error;
pub mod login;
pub mod ping;
pub mod send_otp;
pub mod set_password;
pub mod test_email;
pub mod verify_otp;

pub use check_user::check_user;
pub use db_status::db_status;
pub use error::{EnrollApiError, ErrorResponse};
pub use login::login;
pub use ping::ping;
pub use send_otp::send_otp;
pub use set_password::set_password;
pub use test_email::test_email;
pub use verify_otp::verify_otp;
