mod helpers;

mod diagnostics;
mod login;
mod registration;
