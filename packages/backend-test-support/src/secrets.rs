/// HS256 signing secret shared by backend unit and integration tests.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";
