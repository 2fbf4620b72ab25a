/// Liveness probe.
pub async fn ping() -> &'static str {
    "Auth API working!"
}
