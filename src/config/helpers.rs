// src/config/helpers.rs
// Helper functions for loading environment variables

use std::env;

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Like `env_or`, but a set-but-blank variable also takes the default.
pub fn env_or_nonblank(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

pub fn env_u16(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_value_falls_back() {
        // SAFETY: test-only env mutation, no concurrent reader of this key
        unsafe { env::set_var("MITERU_TEST_BLANK", "   ") };
        assert_eq!(env_or_nonblank("MITERU_TEST_BLANK", "fallback"), "fallback");
        unsafe { env::set_var("MITERU_TEST_BLANK", "real") };
        assert_eq!(env_or_nonblank("MITERU_TEST_BLANK", "fallback"), "real");
        unsafe { env::remove_var("MITERU_TEST_BLANK") };
    }

    #[test]
    fn test_out_of_range_port_falls_back() {
        // SAFETY: test-only env mutation, no concurrent reader of this key
        unsafe { env::set_var("MITERU_TEST_PORT", "70000") };
        assert_eq!(env_u16("MITERU_TEST_PORT", 3000), 3000);
        unsafe { env::set_var("MITERU_TEST_PORT", "8080") };
        assert_eq!(env_u16("MITERU_TEST_PORT", 3000), 8080);
        unsafe { env::remove_var("MITERU_TEST_PORT") };
    }
}
