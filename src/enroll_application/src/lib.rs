pub mod use_cases;

pub use use_cases::{
    check_user::{CheckUserError, CheckUserUseCase},
    login::{AuthenticatedSession, LoginError, LoginUseCase},
    send_otp::{OTP_EMAIL_SUBJECT, SendOtpError, SendOtpUseCase},
    set_password::{SetPasswordError, SetPasswordUseCase},
    verify_otp::{VerifyOtpError, VerifyOtpUseCase},
};
