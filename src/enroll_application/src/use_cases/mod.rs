pub mod check_user;
pub mod login;
pub mod send_otp;
pub mod set_password;
pub mod verify_otp;
